//! Dashboard-wide settings from the `app` section

use std::time::Duration;

use serde::{Deserialize, Serialize};

use sensorhub_core::constants::time::SECONDS_PER_DAY;

/// Application settings; every field falls back to its default when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Dashboard title
    pub name: String,

    /// Schema/application version string
    pub version: String,

    /// Seconds between telemetry refreshes
    pub refresh_interval: u64,

    /// Days of history the dashboard keeps
    pub max_history_days: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "IoT Sensor Dashboard".to_string(),
            version: "1.0.0".to_string(),
            refresh_interval: 5,
            max_history_days: 30,
        }
    }
}

impl AppSettings {
    /// Refresh interval as a `Duration`
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }

    /// History retention window as a `Duration`
    pub fn history_retention(&self) -> Duration {
        Duration::from_secs(u64::from(self.max_history_days) * SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"refresh_interval": 10}"#).unwrap();
        assert_eq!(settings.refresh_interval(), Duration::from_secs(10));
        assert_eq!(settings.name, "IoT Sensor Dashboard");
        assert_eq!(settings.history_retention(), Duration::from_secs(30 * 86_400));
    }
}
