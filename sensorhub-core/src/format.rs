//! Display formatting for sensor values

/// Render a value the way the dashboard shows it for a sensor type
///
/// - temperature, humidity, pressure: fixed `precision` decimals
/// - co2, light, occupancy: whole numbers (truncated)
/// - motion: "Active" for any non-zero value, otherwise "Inactive"
/// - anything else: the value's default formatting
pub fn format_value(sensor_key: &str, value: f64, precision: usize) -> String {
    match sensor_key {
        "temperature" | "humidity" | "pressure" => format!("{:.*}", precision, value),
        "co2" | "light" | "occupancy" => format!("{}", value.trunc() as i64),
        "motion" => {
            if value != 0.0 {
                "Active".to_string()
            } else {
                "Inactive".to_string()
            }
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_by_type() {
        assert_eq!(format_value("temperature", 21.456, 1), "21.5");
        assert_eq!(format_value("pressure", 1013.0, 2), "1013.00");
        assert_eq!(format_value("co2", 812.9, 1), "812");
        assert_eq!(format_value("motion", 1.0, 1), "Active");
        assert_eq!(format_value("motion", 0.0, 1), "Inactive");
        assert_eq!(format_value("radiation", 0.25, 1), "0.25");
    }
}
