//! Core sensor model for SensorHub
//!
//! Sensor type descriptors, range validation, reading lifecycle and
//! threshold alert rules for an IoT telemetry dashboard. Everything here is
//! a pure function over immutable inputs: no I/O, no locking, no clocks.
//!
//! ```
//! use sensorhub_core::{SensorReading, SensorTypeDescriptor, ValidatedReading, Validator};
//!
//! let humidity = SensorTypeDescriptor::humidity();
//!
//! // Range check
//! let result = humidity.validate(105.0);
//! assert!(!result.in_range);
//! assert_eq!(result.clamped_hint, 100.0);
//!
//! // Reading lifecycle: flagged, never clamped
//! let reading = SensorReading::new("humidity", 105.0, 1_700_000_000_000);
//! let validated = ValidatedReading::check(reading, &humidity);
//! assert!(validated.is_flagged());
//! assert_eq!(validated.reading.value, 105.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod errors;
pub mod format;
pub mod readings;
pub mod rules;
pub mod sensor;
pub mod stats;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use errors::{RangeError, RuleError, UnknownSensorTypeError};
pub use format::format_value;
pub use readings::{ReadingStatus, SensorReading, ValidatedReading};
pub use rules::{AlertRule, AlertRuleKind, AlertRuleSet, TriggeredAlert};
pub use sensor::{SensorRange, SensorTypeDescriptor};
pub use stats::{detect_anomalies, Statistics};
pub use time::Timestamp;
pub use traits::Validator;
pub use validators::ValidationResult;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
