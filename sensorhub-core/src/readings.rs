//! Sensor Readings and Their Validation Lifecycle
//!
//! A [`SensorReading`] is created by an external fetch adapter, checked
//! against its sensor type's range, and comes out as a [`ValidatedReading`]
//! that is either accepted or flagged. Nothing is dropped and the reading's
//! value is never altered on the way through.

use serde::{Deserialize, Serialize};

use crate::{
    sensor::SensorTypeDescriptor,
    time::Timestamp,
    validators::{self, ValidationResult},
};

/// Raw reading produced by a fetch adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Sensor type key this reading belongs to (e.g. "humidity")
    pub sensor_type: String,

    /// Measured value, as reported
    pub value: f64,

    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
}

impl SensorReading {
    /// Create a reading
    pub fn new(sensor_type: impl Into<String>, value: f64, timestamp: Timestamp) -> Self {
        Self {
            sensor_type: sensor_type.into(),
            value,
            timestamp,
        }
    }
}

/// Disposition of a validated reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReadingStatus {
    /// Inside the declared range
    Accepted,

    /// Outside the declared range; the value is kept as-is
    Flagged {
        /// Suggested display value inside the range
        clamped_hint: f64,
    },
}

/// A reading together with its range check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedReading {
    /// The untouched reading
    pub reading: SensorReading,

    /// Range check outcome
    pub result: ValidationResult,
}

impl ValidatedReading {
    /// Validate a reading against the descriptor of its sensor type
    pub fn check(reading: SensorReading, sensor_type: &SensorTypeDescriptor) -> Self {
        let result = validators::validate(sensor_type, reading.value);
        if !result.in_range {
            log_warn!(
                "flagged {} reading {} at {}",
                reading.sensor_type,
                reading.value,
                reading.timestamp
            );
        }
        Self { reading, result }
    }

    /// Accepted or flagged
    pub fn status(&self) -> ReadingStatus {
        if self.result.in_range {
            ReadingStatus::Accepted
        } else {
            ReadingStatus::Flagged {
                clamped_hint: self.result.clamped_hint,
            }
        }
    }

    /// Whether the reading was flagged
    pub fn is_flagged(&self) -> bool {
        !self.result.in_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_reading_keeps_value() {
        let reading = SensorReading::new("humidity", 105.0, 1_700_000_000_000);
        let validated = ValidatedReading::check(reading.clone(), &SensorTypeDescriptor::humidity());

        assert!(validated.is_flagged());
        assert_eq!(validated.reading, reading);
        assert_eq!(
            validated.status(),
            ReadingStatus::Flagged { clamped_hint: 100.0 }
        );
    }

    #[test]
    fn accepted_reading() {
        let reading = SensorReading::new("motion", 1.0, 0);
        let validated = ValidatedReading::check(reading, &SensorTypeDescriptor::motion());
        assert_eq!(validated.status(), ReadingStatus::Accepted);
    }

    #[test]
    fn status_serializes_tagged() {
        let json = serde_json::to_value(ReadingStatus::Flagged { clamped_hint: 1.0 }).unwrap();
        assert_eq!(json["status"], "flagged");
        assert_eq!(json["clamped_hint"], 1.0);
    }
}
