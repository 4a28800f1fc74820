//! Closed-interval range checking

use serde::Serialize;

use crate::sensor::{SensorRange, SensorTypeDescriptor};

/// Outcome of checking one value against a sensor range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationResult {
    /// `min <= value <= max`
    pub in_range: bool,

    /// `max(min(value, max), min)` - a display suggestion only
    pub clamped_hint: f64,
}

/// Check `value` against a bare range
pub fn check_range(range: &SensorRange, value: f64) -> ValidationResult {
    ValidationResult {
        in_range: range.contains(value),
        clamped_hint: range.clamp_hint(value),
    }
}

/// Check `value` against a sensor type's declared range
pub fn validate(sensor_type: &SensorTypeDescriptor, value: f64) -> ValidationResult {
    let result = check_range(&sensor_type.range, value);
    if !result.in_range {
        log_debug!(
            "{} reading {} outside [{}, {}]",
            sensor_type.key,
            value,
            sensor_type.range.min(),
            sensor_type.range.max()
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humidity_above_range() {
        let result = validate(&SensorTypeDescriptor::humidity(), 105.0);
        assert!(!result.in_range);
        assert_eq!(result.clamped_hint, 100.0);
    }

    #[test]
    fn bounds_are_inclusive() {
        let humidity = SensorTypeDescriptor::humidity();
        assert!(validate(&humidity, 0.0).in_range);
        assert!(validate(&humidity, 100.0).in_range);
    }

    #[test]
    fn motion_has_no_boolean_coercion() {
        let motion = SensorTypeDescriptor::motion();

        let half = validate(&motion, 0.5);
        assert!(half.in_range);
        assert_eq!(half.clamped_hint, 0.5);

        let two = validate(&motion, 2.0);
        assert!(!two.in_range);
        assert_eq!(two.clamped_hint, 1.0);

        let negative = validate(&motion, -1.0);
        assert!(!negative.in_range);
        assert_eq!(negative.clamped_hint, 0.0);
    }

    #[test]
    fn nan_is_out_of_range() {
        let result = validate(&SensorTypeDescriptor::humidity(), f64::NAN);
        assert!(!result.in_range);
        assert!(SensorTypeDescriptor::humidity().range.contains(result.clamped_hint));
    }
}
