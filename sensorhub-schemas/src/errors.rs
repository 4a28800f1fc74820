//! Error taxonomy for schema loading and resolution
//!
//! | Error                     | When                                  | Scope                  |
//! |---------------------------|---------------------------------------|------------------------|
//! | [`SchemaError`]           | malformed schema document             | fatal at startup       |
//! | [`UnknownPlatformError`]  | lookup of a name not in the schema    | the one lookup         |
//! | [`MissingParameterError`] | required parameter resolved to empty  | the one platform       |
//! | [`ConfigIncompleteWarning`] | alert channel enabled but incomplete | the one channel        |
//!
//! Only `SchemaError` should stop a dashboard from starting. Every other
//! failure is scoped to the platform, sensor or channel being resolved.

use std::path::PathBuf;

use thiserror::Error;

use crate::alerts::ChannelKind;

/// Result type for schema loading
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Malformed static schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Document is not valid JSON/YAML or has the wrong shape
    #[error("Failed to parse schema: {0}")]
    Parse(String),

    /// Schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported format
    #[error("Unsupported schema format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// A required top-level section is absent
    #[error("Schema section '{0}' is missing")]
    MissingSection(&'static str),

    /// A platform declares zero connection parameters
    #[error("Platform '{platform}' declares no connection parameters")]
    NoConnectionParams {
        /// Platform name
        platform: String,
    },

    /// A connection parameter lacks `label` or `env_var`
    #[error("Parameter '{param}' of platform '{platform}' is missing required field '{field}'")]
    MissingField {
        /// Platform name
        platform: String,
        /// Parameter name
        param: String,
        /// Missing field
        field: &'static str,
    },

    /// `env_var` is not a valid identifier
    #[error("Parameter '{param}' of platform '{platform}' has invalid env var name '{env_var}'")]
    InvalidEnvVar {
        /// Platform name
        platform: String,
        /// Parameter name
        param: String,
        /// Offending env var name
        env_var: String,
    },

    /// A sensitive parameter ships a non-empty default in the schema
    #[error("Sensitive parameter '{param}' of platform '{platform}' must not declare a default value")]
    SensitiveDefault {
        /// Platform name
        platform: String,
        /// Parameter name
        param: String,
    },

    /// A sensor type lacks `min` or `max`
    #[error("Sensor type '{sensor}' is missing required field '{field}'")]
    MissingSensorField {
        /// Sensor type key
        sensor: String,
        /// Missing field
        field: &'static str,
    },

    /// A sensor type declares `min > max`
    #[error("Sensor type '{sensor}' has inverted range: min {min} is greater than max {max}")]
    InvertedRange {
        /// Sensor type key
        sensor: String,
        /// Declared lower bound
        min: f64,
        /// Declared upper bound
        max: f64,
    },

    /// A sensor type declares a NaN or infinite bound
    #[error("Sensor type '{sensor}' has a non-finite range bound")]
    NonFiniteRange {
        /// Sensor type key
        sensor: String,
    },
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

/// Lookup of a platform name that the schema does not declare
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Platform not found: {name}")]
pub struct UnknownPlatformError {
    /// Name that was looked up
    pub name: String,
}

/// Non-optional connection parameters resolved to empty values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Setup incomplete for platform '{platform}': missing {}", .params.join(", "))]
pub struct MissingParameterError {
    /// Platform name
    pub platform: String,
    /// Missing parameter names, in declared order
    pub params: Vec<String>,
}

/// Either of the recoverable per-platform failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// Name not in the schema
    #[error(transparent)]
    Unknown(#[from] UnknownPlatformError),

    /// Required parameters empty
    #[error(transparent)]
    Missing(#[from] MissingParameterError),
}

/// Alert channel enabled without all of its required fields
///
/// Not fatal: the channel stays inactive and the rest of the dashboard
/// carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} alerts enabled but incomplete: missing {}", .missing.join(", "))]
pub struct ConfigIncompleteWarning {
    /// Channel kind
    pub kind: ChannelKind,
    /// Required fields that are empty or invalid
    pub missing: Vec<&'static str>,
}

/// Environment file could not be read
#[derive(Debug, Error)]
#[error("Failed to load environment file: {0}")]
pub struct EnvironmentError(#[from] pub dotenvy::Error);
