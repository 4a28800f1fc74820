//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds per day, used when converting history retention windows.
pub const SECONDS_PER_DAY: u64 = SECONDS_PER_MINUTE * 60 * 24;
