//! Constants for SensorHub Core
//!
//! Numeric values shared by the validators, the alert rules and the
//! built-in schema live here so that the defaults a dashboard ships with
//! and the ranges tests assert against cannot drift apart.
//!
//! ## Organization
//!
//! - **Sensors**: declared ranges, units and icons for the built-in sensor types
//! - **Time**: unit conversions used by rate calculations

/// Built-in sensor type ranges, units and icons.
pub mod sensors;

/// Time unit conversions.
pub mod time;

pub use sensors::DEFAULT_ICON;
pub use time::MS_PER_SECOND;
