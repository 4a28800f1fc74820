//! Sensor Type Descriptors
//!
//! A sensor type is a category of measurement (temperature, humidity,
//! motion, ...) with a display label, a unit, an icon and a declared valid
//! range. Descriptors are built once when a schema is loaded and are
//! read-only afterwards, so they can be shared freely between threads.

use serde::{Deserialize, Serialize};

use crate::{
    constants::sensors::{self, icon_for},
    errors::{RangeError, RangeResult},
};

/// Closed numeric interval `[min, max]` with `min <= max`
///
/// The invariant is enforced on construction, so every `SensorRange` in
/// circulation is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorRange {
    min: f64,
    max: f64,
}

impl SensorRange {
    /// Build a range, rejecting inverted or non-finite bounds
    pub fn new(min: f64, max: f64) -> RangeResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError::NotFinite);
        }
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` lies inside the closed interval.
    ///
    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Nearest value inside the range.
    ///
    /// Computed as `max(min(value, max), min)`; a NaN input yields `max`,
    /// so the result is always inside the range.
    pub fn clamp_hint(&self, value: f64) -> f64 {
        value.min(self.max).max(self.min)
    }
}

impl<'de> Deserialize<'de> for SensorRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            min: f64,
            max: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        SensorRange::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

/// Immutable description of a sensor type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorTypeDescriptor {
    /// Schema key (e.g. "temperature")
    pub key: String,

    /// Display label (e.g. "Temperature")
    pub label: String,

    /// Unit string (e.g. "°C")
    pub unit: String,

    /// Icon identifier for the dashboard
    pub icon: String,

    /// Declared valid range
    pub range: SensorRange,
}

impl SensorTypeDescriptor {
    /// Create a descriptor, validating its range
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        icon: Option<String>,
        min: f64,
        max: f64,
    ) -> RangeResult<Self> {
        let key = key.into();
        let icon = icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| icon_for(&key).to_string());

        Ok(Self {
            range: SensorRange::new(min, max)?,
            label: label.into(),
            unit: unit.into(),
            icon,
            key,
        })
    }

    /// The binary motion signal, range `[0, 1]`
    pub fn motion() -> Self {
        Self {
            key: "motion".to_string(),
            label: "Motion".to_string(),
            unit: "binary".to_string(),
            icon: icon_for("motion").to_string(),
            range: SensorRange {
                min: sensors::MOTION_MIN,
                max: sensors::MOTION_MAX,
            },
        }
    }

    /// Relative humidity, range `[0, 100]`
    pub fn humidity() -> Self {
        Self {
            key: "humidity".to_string(),
            label: "Humidity".to_string(),
            unit: "%".to_string(),
            icon: icon_for("humidity").to_string(),
            range: SensorRange {
                min: sensors::HUMIDITY_MIN_PCT,
                max: sensors::HUMIDITY_MAX_PCT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_rejected() {
        assert_eq!(
            SensorRange::new(10.0, 5.0),
            Err(RangeError::Inverted { min: 10.0, max: 5.0 })
        );
        assert_eq!(SensorRange::new(f64::NAN, 5.0), Err(RangeError::NotFinite));
    }

    #[test]
    fn degenerate_range_allowed() {
        let range = SensorRange::new(3.0, 3.0).unwrap();
        assert!(range.contains(3.0));
        assert!(!range.contains(3.1));
    }

    #[test]
    fn clamp_hint_never_escapes() {
        let range = SensorRange::new(0.0, 100.0).unwrap();
        assert_eq!(range.clamp_hint(105.0), 100.0);
        assert_eq!(range.clamp_hint(-5.0), 0.0);
        assert_eq!(range.clamp_hint(42.0), 42.0);
        assert_eq!(range.clamp_hint(f64::NAN), 100.0);
    }

    #[test]
    fn missing_icon_falls_back() {
        let descriptor =
            SensorTypeDescriptor::new("radiation", "Radiation", "uSv/h", None, 0.0, 10.0).unwrap();
        assert_eq!(descriptor.icon, "box");

        let descriptor =
            SensorTypeDescriptor::new("co2", "CO2", "ppm", Some(" ".into()), 0.0, 5000.0).unwrap();
        assert_eq!(descriptor.icon, "wind");
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let result: Result<SensorRange, _> = serde_json::from_str(r#"{"min": 5, "max": 1}"#);
        assert!(result.is_err());
    }
}
