//! Property tests for sensor range validation
//!
//! For every well-formed range and every value, the in-range flag matches
//! the closed-interval definition and the display hint never leaves the
//! range.

use proptest::prelude::*;

use sensorhub_core::{
    validators, SensorRange, SensorReading, SensorTypeDescriptor, ValidatedReading, Validator,
};

fn range_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e6f64..1.0e6, 0.0f64..1.0e6).prop_map(|(min, width)| (min, min + width))
}

proptest! {
    #[test]
    fn in_range_matches_definition((min, max) in range_strategy(), value in -2.0e6f64..2.0e6) {
        let descriptor = SensorTypeDescriptor::new("gauge", "Gauge", "u", None, min, max).unwrap();
        let result = validators::validate(&descriptor, value);
        prop_assert_eq!(result.in_range, min <= value && value <= max);
    }

    #[test]
    fn clamped_hint_stays_inside((min, max) in range_strategy(), value in proptest::num::f64::ANY) {
        let range = SensorRange::new(min, max).unwrap();
        let result = range.validate(value);
        prop_assert!(min <= result.clamped_hint && result.clamped_hint <= max);
    }

    #[test]
    fn in_range_hint_is_identity((min, max) in range_strategy(), fraction in 0.0f64..=1.0) {
        let range = SensorRange::new(min, max).unwrap();
        let value = min + (max - min) * fraction;
        let result = range.validate(value);
        if result.in_range {
            prop_assert_eq!(result.clamped_hint, value);
        }
    }

    #[test]
    fn validation_never_alters_reading(value in proptest::num::f64::NORMAL) {
        let reading = SensorReading::new("humidity", value, 42);
        let validated = ValidatedReading::check(reading.clone(), &SensorTypeDescriptor::humidity());
        prop_assert_eq!(validated.reading, reading);
    }

    #[test]
    fn inverted_ranges_rejected(min in -1.0e6f64..1.0e6, gap in 1.0e-3f64..1.0e3) {
        prop_assert!(SensorRange::new(min, min - gap).is_err());
    }
}

#[test]
fn humidity_scenario() {
    let humidity =
        SensorTypeDescriptor::new("humidity", "Humidity", "%", Some("droplet".into()), 0.0, 100.0)
            .unwrap();
    let result = humidity.validate(105.0);
    assert!(!result.in_range);
    assert_eq!(result.clamped_hint, 100.0);
}
