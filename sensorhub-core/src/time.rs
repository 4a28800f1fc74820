//! Time Handling for Sensor Readings
//!
//! Readings carry a millisecond timestamp supplied by whichever fetch
//! adapter produced them. This crate never reads a clock on its own; rate
//! calculations work purely on the timestamps they are given.

use crate::constants::time::MS_PER_SECOND;

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Seconds elapsed between two timestamps.
///
/// Returns `None` when `to` is not strictly after `from`; a zero or
/// negative interval has no meaningful per-second rate.
pub fn elapsed_secs(from: Timestamp, to: Timestamp) -> Option<f64> {
    if to <= from {
        return None;
    }
    Some((to - from) as f64 / MS_PER_SECOND as f64)
}

/// Absolute rate of change per second between two timestamped values
pub fn rate_per_sec(previous: (f64, Timestamp), current: (f64, Timestamp)) -> Option<f64> {
    let secs = elapsed_secs(previous.1, current.1)?;
    Some((current.0 - previous.0).abs() / secs)
}
