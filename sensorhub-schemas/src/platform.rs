//! Platform and connection parameter descriptors
//!
//! These are the validated, immutable forms of the `platforms` section of
//! a schema document. Parameter order is the declaration order in the
//! document; the dashboard renders its setup forms in that order.

use indexmap::IndexMap;
use serde::Serialize;

/// Label marker for parameters that may legitimately stay empty
pub const OPTIONAL_MARKER: &str = "(optional)";

/// One connection parameter of a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionParamSpec {
    /// Parameter key (e.g. "region")
    pub name: String,

    /// Display name (e.g. "AWS Region")
    pub label: String,

    /// Schema default; always empty for sensitive parameters
    pub default: String,

    /// Environment variable consulted before the default
    pub env_var: String,

    /// Never log or export the resolved value in plaintext
    pub sensitive: bool,
}

impl ConnectionParamSpec {
    /// Parameters whose label carries "(optional)" may resolve to empty
    pub fn is_optional(&self) -> bool {
        self.label
            .to_ascii_lowercase()
            .contains(OPTIONAL_MARKER)
    }
}

/// Immutable description of an IoT platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformDescriptor {
    /// Platform name, the lookup key (e.g. "MQTT Broker")
    pub name: String,

    /// Human description
    pub description: String,

    /// Connection parameters in declaration order (never empty)
    pub connection_params: IndexMap<String, ConnectionParamSpec>,
}

impl PlatformDescriptor {
    /// Parameters in declaration order
    pub fn params(&self) -> impl ExactSizeIterator<Item = &ConnectionParamSpec> + '_ {
        self.connection_params.values()
    }

    /// Look up one parameter by key
    pub fn param(&self, name: &str) -> Option<&ConnectionParamSpec> {
        self.connection_params.get(name)
    }

    /// Parameters that must resolve to a non-empty value
    pub fn required_params(&self) -> impl Iterator<Item = &ConnectionParamSpec> + '_ {
        self.params().filter(|spec| !spec.is_optional())
    }
}

/// Whether `name` is usable as an environment variable identifier
///
/// ASCII letter or underscore first, then ASCII letters, digits or
/// underscores.
pub fn is_valid_env_var(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
