//! Built-in Sensor Type Ranges and Icons
//!
//! Declared valid ranges for the sensor types a dashboard knows about out
//! of the box. These are display ranges for an indoor/outdoor monitoring
//! deployment, not physical limits: a reading outside them is flagged for
//! the consumer to decide on, never discarded.

// ===== TEMPERATURE =====

/// Lowest temperature shown on the dashboard (°C).
pub const TEMPERATURE_MIN_C: f64 = -50.0;

/// Highest temperature shown on the dashboard (°C).
pub const TEMPERATURE_MAX_C: f64 = 150.0;

// ===== HUMIDITY =====

/// Relative humidity lower bound (%).
pub const HUMIDITY_MIN_PCT: f64 = 0.0;

/// Relative humidity upper bound (%).
///
/// Supersaturated readings above 100% are reported as out of range.
pub const HUMIDITY_MAX_PCT: f64 = 100.0;

// ===== PRESSURE =====

/// Barometric pressure lower bound (hPa).
pub const PRESSURE_MIN_HPA: f64 = 900.0;

/// Barometric pressure upper bound (hPa).
pub const PRESSURE_MAX_HPA: f64 = 1100.0;

// ===== AIR QUALITY AND LIGHT =====

/// CO2 concentration lower bound (ppm).
pub const CO2_MIN_PPM: f64 = 0.0;

/// CO2 concentration upper bound (ppm).
pub const CO2_MAX_PPM: f64 = 5000.0;

/// Illuminance lower bound (lux).
pub const LIGHT_MIN_LUX: f64 = 0.0;

/// Illuminance upper bound (lux).
pub const LIGHT_MAX_LUX: f64 = 10000.0;

// ===== PRESENCE =====

/// Motion is a binary signal encoded as 0 or 1.
pub const MOTION_MIN: f64 = 0.0;

/// Motion is a binary signal encoded as 0 or 1.
pub const MOTION_MAX: f64 = 1.0;

/// Occupancy lower bound (people).
pub const OCCUPANCY_MIN: f64 = 0.0;

/// Occupancy upper bound (people).
pub const OCCUPANCY_MAX: f64 = 100.0;

// ===== ICONS =====

/// Icon used for sensor types without a declared icon.
pub const DEFAULT_ICON: &str = "box";

/// Known sensor keys and their icon identifiers.
pub const SENSOR_ICONS: &[(&str, &str)] = &[
    ("temperature", "thermometer"),
    ("humidity", "droplet"),
    ("pressure", "activity"),
    ("co2", "wind"),
    ("light", "sun"),
    ("motion", "activity"),
    ("occupancy", "users"),
];

/// Icon identifier for a sensor key, falling back to [`DEFAULT_ICON`].
pub fn icon_for(sensor_key: &str) -> &'static str {
    SENSOR_ICONS
        .iter()
        .find(|(key, _)| *key == sensor_key)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
