//! Connection Parameter Resolution
//!
//! ## Overview
//!
//! Every connection parameter resolves to exactly one effective value
//! from an ordered chain of sources. The first source that yields a
//! non-empty value wins; the schema default closes the chain and always
//! answers, even when it is empty.
//!
//! ```text
//! OverrideSource ──▶ EnvSource ──▶ [extra sources] ──▶ schema default
//!  (form input)      (env[env_var])  (secrets manager)   (always answers)
//! ```
//!
//! ## Sensitive Values
//!
//! A [`ResolvedParam`] for a sensitive parameter only renders its value as
//! a mask: `Debug`, `Display`, [`ResolvedParam::diagnostic`] and
//! `Serialize` never include the raw string. Log lines written here use the
//! same masked rendering.
//!
//! ## Extending the Chain
//!
//! ```rust
//! use sensorhub_schemas::resolver::{EnvSource, OverrideSource, ParamSource, ResolutionSource, Resolver};
//! use sensorhub_schemas::{ConnectionParamSpec, Environment, Overrides};
//!
//! struct Vault;
//!
//! impl ParamSource for Vault {
//!     fn source(&self) -> ResolutionSource {
//!         ResolutionSource::Provider("vault".to_string())
//!     }
//!
//!     fn lookup(&self, spec: &ConnectionParamSpec) -> Option<String> {
//!         (spec.name == "secret_key").then(|| "from-vault".to_string())
//!     }
//! }
//!
//! let overrides = Overrides::new();
//! let env = Environment::empty();
//! let resolver = Resolver::new()
//!     .with_source(OverrideSource::new(&overrides))
//!     .with_source(Vault)
//!     .with_source(EnvSource::new(&env));
//! # let _ = resolver;
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{
    environment::{Environment, Overrides},
    masking::mask,
    platform::ConnectionParamSpec,
};

/// Which input supplied a parameter's effective value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Caller-supplied override
    Override,
    /// Environment variable named by the parameter
    Env,
    /// Schema default (possibly empty)
    Default,
    /// An additional source plugged into the chain
    Provider(String),
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Override => f.write_str("override"),
            ResolutionSource::Env => f.write_str("env"),
            ResolutionSource::Default => f.write_str("default"),
            ResolutionSource::Provider(name) => f.write_str(name),
        }
    }
}

/// One link in the resolution chain
pub trait ParamSource {
    /// Tag recorded on parameters this source resolves
    fn source(&self) -> ResolutionSource;

    /// Candidate value for `spec`; empty strings are treated as absent
    fn lookup(&self, spec: &ConnectionParamSpec) -> Option<String>;
}

/// Caller overrides keyed by parameter name
#[derive(Debug, Clone, Copy)]
pub struct OverrideSource<'a> {
    overrides: &'a Overrides,
}

impl<'a> OverrideSource<'a> {
    /// Wrap an override map
    pub fn new(overrides: &'a Overrides) -> Self {
        Self { overrides }
    }
}

impl ParamSource for OverrideSource<'_> {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Override
    }

    fn lookup(&self, spec: &ConnectionParamSpec) -> Option<String> {
        self.overrides.get(&spec.name).cloned()
    }
}

/// Environment snapshot keyed by each spec's `env_var`
#[derive(Debug, Clone, Copy)]
pub struct EnvSource<'a> {
    environment: &'a Environment,
}

impl<'a> EnvSource<'a> {
    /// Wrap an environment snapshot
    pub fn new(environment: &'a Environment) -> Self {
        Self { environment }
    }
}

impl ParamSource for EnvSource<'_> {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Env
    }

    fn lookup(&self, spec: &ConnectionParamSpec) -> Option<String> {
        self.environment.get(&spec.env_var).map(str::to_string)
    }
}

/// A parameter with its effective value
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedParam {
    /// Parameter key
    pub name: String,
    value: String,
    /// Whether the value must stay redacted
    pub sensitive: bool,
    /// Source that supplied the value
    pub source: ResolutionSource,
}

impl ResolvedParam {
    /// The raw resolved value, for client code that opens connections
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Value safe for logs and UIs: masked when sensitive
    pub fn display_value(&self) -> Cow<'_, str> {
        if self.sensitive {
            Cow::Borrowed(mask(&self.value))
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    /// One-line diagnostic, e.g. `region=eu-west-1 (env)`
    pub fn diagnostic(&self) -> String {
        format!("{}={} ({})", self.name, self.display_value(), self.source)
    }
}

impl fmt::Debug for ResolvedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedParam")
            .field("name", &self.name)
            .field("value", &self.display_value())
            .field("sensitive", &self.sensitive)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for ResolvedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic())
    }
}

impl Serialize for ResolvedParam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedParam", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.display_value())?;
        state.serialize_field("sensitive", &self.sensitive)?;
        state.serialize_field("source", &self.source)?;
        state.end()
    }
}

/// Ordered chain of parameter sources
#[derive(Default)]
pub struct Resolver<'a> {
    sources: Vec<Box<dyn ParamSource + 'a>>,
}

impl<'a> Resolver<'a> {
    /// A chain with no sources; every parameter falls through to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: override, then environment, then default
    pub fn standard(overrides: &'a Overrides, environment: &'a Environment) -> Self {
        Self::new()
            .with_source(OverrideSource::new(overrides))
            .with_source(EnvSource::new(environment))
    }

    /// Append a source; it is consulted after every source already present
    pub fn with_source(mut self, source: impl ParamSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Resolve one parameter: first non-empty source wins, default closes
    pub fn resolve(&self, spec: &ConnectionParamSpec) -> ResolvedParam {
        let (value, source) = self
            .sources
            .iter()
            .find_map(|source| {
                source
                    .lookup(spec)
                    .filter(|value| !value.is_empty())
                    .map(|value| (value, source.source()))
            })
            .unwrap_or_else(|| (spec.default.clone(), ResolutionSource::Default));

        let resolved = ResolvedParam {
            name: spec.name.clone(),
            value,
            sensitive: spec.sensitive,
            source,
        };
        log::debug!("resolved {}", resolved.diagnostic());
        resolved
    }

    /// Resolve a sequence of parameters, preserving order
    pub fn resolve_all<'s>(
        &self,
        specs: impl IntoIterator<Item = &'s ConnectionParamSpec>,
    ) -> Vec<ResolvedParam> {
        specs.into_iter().map(|spec| self.resolve(spec)).collect()
    }
}

/// Resolve one parameter with the standard chain
pub fn resolve(
    spec: &ConnectionParamSpec,
    overrides: &Overrides,
    environment: &Environment,
) -> ResolvedParam {
    Resolver::standard(overrides, environment).resolve(spec)
}
