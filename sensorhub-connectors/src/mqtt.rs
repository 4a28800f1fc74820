//! MQTT broker settings
//!
//! The broker port arrives as a string and must parse as a non-zero `u16`.
//! Topics are written comma-separated in a single parameter
//! (`"sensors/#, plant/+/temp"`); each entry is trimmed and empty entries
//! are dropped.

use std::time::Duration;

use sensorhub_schemas::{ResolvedPlatform, Secret};

use crate::{optional, optional_secret, required, ConnectorError, ConnectorResult};

/// Keep-alive interval handed to MQTT clients
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);

/// Client id prefix; adapters append something unique per connection
pub const CLIENT_ID_PREFIX: &str = "iot-dashboard";

/// Typed MQTT broker settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttSettings {
    /// Broker host name or address
    pub broker: String,
    /// Broker port
    pub port: u16,
    /// Login, if the broker requires one
    pub username: Option<String>,
    /// Password, if set
    pub password: Option<Secret>,
    /// Subscription filters, at least one
    pub topics: Vec<String>,
}

impl MqttSettings {
    /// Convert the resolved `MQTT Broker` parameters
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let broker = required(resolved, "broker")?;
        let port = parse_port(&required(resolved, "port")?)?;
        let topics = split_topics(&required(resolved, "topics")?);
        if topics.is_empty() {
            return Err(ConnectorError::InvalidValue {
                param: "topics",
                reason: "no topic filters given".to_string(),
            });
        }

        Ok(Self {
            broker,
            port,
            username: optional(resolved, "username"),
            password: optional_secret(resolved, "password"),
            topics,
        })
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.broker, self.port)
    }

    /// Client options for `rumqttc`; no connection is opened
    ///
    /// A password without a username is ignored, as MQTT has no way to
    /// send one alone.
    #[cfg(feature = "mqtt")]
    pub fn mqtt_options(&self, client_suffix: &str) -> rumqttc::MqttOptions {
        let client_id = format!("{}-{}", CLIENT_ID_PREFIX, client_suffix);
        let mut options = rumqttc::MqttOptions::new(client_id, self.broker.clone(), self.port);
        options.set_keep_alive(DEFAULT_KEEP_ALIVE);
        if let Some(username) = &self.username {
            let password = self
                .password
                .as_ref()
                .map(|password| password.expose().to_string())
                .unwrap_or_default();
            options.set_credentials(username.clone(), password);
        }
        options
    }
}

fn parse_port(raw: &str) -> ConnectorResult<u16> {
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConnectorError::InvalidValue {
            param: "port",
            reason: format!("'{}' is not a port number (1-65535)", raw),
        }),
        Ok(port) => Ok(port),
    }
}

fn split_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resolved;

    #[test]
    fn defaults_give_public_broker() {
        let settings = MqttSettings::from_resolved(&resolved("MQTT Broker", &[])).unwrap();
        assert_eq!(settings.address(), "mqtt.eclipse.org:1883");
        assert_eq!(settings.topics, vec!["sensors/#"]);
        assert_eq!(settings.username, None);
        assert_eq!(settings.password, None);
    }

    #[test]
    fn topics_are_split_and_trimmed() {
        let settings = MqttSettings::from_resolved(&resolved(
            "MQTT Broker",
            &[("MQTT_TOPICS", " a/# ,, b/+/temp ,")],
        ))
        .unwrap();
        assert_eq!(settings.topics, vec!["a/#", "b/+/temp"]);
    }

    #[test]
    fn only_commas_is_invalid() {
        let err = MqttSettings::from_resolved(&resolved("MQTT Broker", &[("MQTT_TOPICS", ", ,")]))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidValue { param: "topics", .. }));
    }

    #[test]
    fn bad_ports() {
        for port in ["0", "65536", "eighty", "-1"] {
            let err = MqttSettings::from_resolved(&resolved("MQTT Broker", &[("MQTT_PORT", port)]))
                .unwrap_err();
            assert!(
                matches!(err, ConnectorError::InvalidValue { param: "port", .. }),
                "port {}",
                port
            );
        }
    }

    #[test]
    fn credentials_are_masked_in_debug() {
        let settings = MqttSettings::from_resolved(&resolved(
            "MQTT Broker",
            &[("MQTT_USERNAME", "dash"), ("MQTT_PASSWORD", "hunter2")],
        ))
        .unwrap();
        assert_eq!(settings.username.as_deref(), Some("dash"));
        assert_eq!(settings.password.as_ref().map(Secret::expose), Some("hunter2"));
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }

    #[cfg(feature = "mqtt")]
    #[test]
    fn builds_client_options() {
        let settings = MqttSettings::from_resolved(&resolved(
            "MQTT Broker",
            &[("MQTT_BROKER", "broker.local"), ("MQTT_PORT", "8883")],
        ))
        .unwrap();
        let options = settings.mqtt_options("test");
        assert_eq!(options.broker_address(), ("broker.local".to_string(), 8883));
        assert_eq!(options.client_id(), "iot-dashboard-test");
        assert_eq!(options.keep_alive(), DEFAULT_KEEP_ALIVE);
    }
}
