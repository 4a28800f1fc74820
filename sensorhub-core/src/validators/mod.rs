//! Sensor Range Validation
//!
//! ## Overview
//!
//! Every sensor type declares a valid range `[min, max]`. Validation answers
//! one question - is this reading inside the declared range - and offers a
//! display hint for readings that are not.
//!
//! ## What Validation Does Not Do
//!
//! The validator never mutates, clamps or drops a reading. An out-of-range
//! value is flagged and handed back; the consumer decides whether to
//! discard it, cap it for display, or surface it as an anomaly.
//!
//! ```text
//! fetch adapter ──▶ SensorReading ──▶ validate ──┬─▶ Accepted (in range)
//!                                                └─▶ Flagged  (out of range, value untouched)
//! ```
//!
//! ### Binary Signals
//!
//! The `motion` type uses the range `[0, 1]` to encode a boolean signal.
//! There is no boolean coercion: `0.5` is in range, `2.0` is flagged like
//! any other out-of-range value.
//!
//! ## Usage Example
//!
//! ```rust
//! use sensorhub_core::{validators, SensorTypeDescriptor};
//!
//! let humidity = SensorTypeDescriptor::humidity();
//! let result = validators::validate(&humidity, 105.0);
//!
//! assert!(!result.in_range);
//! assert_eq!(result.clamped_hint, 100.0);
//! ```

mod range;

pub use range::{check_range, validate, ValidationResult};
