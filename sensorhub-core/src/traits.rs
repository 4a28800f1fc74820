//! Core traits for validators
//!
//! These traits define the interface all validators implement.
//! Keep them simple - a validator reports, it never rewrites the reading.

use crate::sensor::{SensorRange, SensorTypeDescriptor};
use crate::validators::{self, ValidationResult};

/// Core validator trait - implemented by anything that carries a declared range
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Check a single value against the declared range
    fn validate(&self, value: Self::Value) -> ValidationResult;

    /// The range this validator checks against
    fn range(&self) -> SensorRange;
}

impl Validator for SensorRange {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult {
        validators::check_range(self, value)
    }

    fn range(&self) -> SensorRange {
        *self
    }
}

impl Validator for SensorTypeDescriptor {
    type Value = f64;

    fn validate(&self, value: f64) -> ValidationResult {
        validators::validate(self, value)
    }

    fn range(&self) -> SensorRange {
        self.range
    }
}
