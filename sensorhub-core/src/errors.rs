//! Error Types for Sensor Descriptors
//!
//! Range validation itself never fails: an out-of-range reading is a
//! result, not an error (see [`crate::validators`]). The errors here cover
//! the cases where a descriptor cannot be built at all.
//!
//! ## Error Categories
//!
//! - `RangeError::Inverted`: a declared range has `min > max`
//! - `RangeError::NotFinite`: a bound is NaN or infinite
//!
//! Callers loading a schema map these into their own load-time error so
//! the offending sensor key is reported alongside the bounds.

use thiserror::Error;

/// Result type for descriptor construction
pub type RangeResult<T> = Result<T, RangeError>;

/// Invalid numeric range for a sensor type
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    /// Lower bound is greater than upper bound
    #[error("Inverted range: min {min} is greater than max {max}")]
    Inverted {
        /// Declared lower bound
        min: f64,
        /// Declared upper bound
        max: f64,
    },

    /// A bound is NaN or infinite
    #[error("Range bounds must be finite numbers")]
    NotFinite,
}

/// A sensor type key that the caller asked about does not exist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sensor type: {key}")]
pub struct UnknownSensorTypeError {
    /// The key that was looked up
    pub key: String,
}

/// An alert rule that cannot be evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// Threshold is NaN or infinite
    #[error("Alert threshold for {sensor_id} must be a finite number")]
    NonFiniteThreshold {
        /// Sensor the rule was bound to
        sensor_id: String,
    },

    /// Rule has no sensor to watch
    #[error("Alert rule is missing a sensor id")]
    MissingSensor,
}
