//! Environment snapshots and caller overrides
//!
//! Resolution never reads the process environment directly. Callers take
//! a snapshot once (from the process, a `.env` file, or a plain map) and
//! pass it by reference, so two resolutions with the same snapshot always
//! agree and tests never touch global state.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::EnvironmentError;

/// Parameter name → user-supplied value (e.g. a setup form)
pub type Overrides = HashMap<String, String>;

/// Immutable snapshot of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// An environment with no variables
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Parse a `.env` file without touching the process environment
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self, EnvironmentError> {
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        log::debug!(
            "loaded {} variables from {}",
            vars.len(),
            path.as_ref().display()
        );
        Ok(Self { vars })
    }

    /// Layer `other` on top of this snapshot; `other` wins on conflicts
    pub fn overlay(mut self, other: Environment) -> Self {
        self.vars.extend(other.vars);
        self
    }

    /// Builder-style single variable
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Value of `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of variables in the snapshot
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
