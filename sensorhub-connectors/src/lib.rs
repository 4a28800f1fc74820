//! Platform Connection Settings and the Fetch Adapter Contract
//!
//! ## Overview
//!
//! The schema crate resolves every connection parameter of a platform to a
//! string. The adapters that actually talk to AWS IoT, Azure IoT Hub,
//! ThingSpeak, an MQTT broker or a custom REST API need typed values:
//! a `u16` port, a list of topics, credentials that are either present or
//! absent. This crate performs that conversion once, right after
//! [`Schema::check_platform`] succeeds, and defines the [`FetchAdapter`]
//! trait every adapter implements.
//!
//! ```text
//!  Schema ──check_platform──▶ ResolvedPlatform ──from_resolved──▶ PlatformSettings
//!                                                                       │
//!                                            external adapter ◀─────────┘
//!                                                   │ latest()/history()
//!                                                   ▼
//!                                     Schema::validate_reading ──▶ ValidatedReading
//! ```
//!
//! No network I/O happens here. Adapters own their connections, retries
//! and timeouts.
//!
//! ## Platform Guide
//!
//! | Platform        | Settings                | Notes                                   |
//! |-----------------|-------------------------|-----------------------------------------|
//! | `AWS IoT Core`  | [`AwsIotSettings`]      | endpoint host, region, key pair         |
//! | `Azure IoT Hub` | [`AzureIotSettings`]    | device connection string, hub name      |
//! | `ThingSpeak`    | [`ThingSpeakSettings`]  | numeric channel id, read API key        |
//! | `MQTT Broker`   | [`MqttSettings`]        | port parsed, topics split on commas     |
//! | `Custom API`    | [`CustomApiSettings`]   | API key preferred over basic auth       |
//!
//! ## Credentials
//!
//! Every credential is held as a [`Secret`]: `Debug` output of any
//! settings struct shows only a mask. Optional credentials left empty come
//! back as `None` rather than as an empty string.
//!
//! ## Feature Flags
//!
//! - `mqtt` (default): [`MqttSettings::mqtt_options`] builds `rumqttc` options
//! - `http`: [`CustomApiSettings::request`] builds a `ureq` request with auth headers
//!
//! ## Example Usage
//!
//! ```rust
//! use sensorhub_connectors::{settings_for, PlatformSettings};
//! use sensorhub_schemas::{Environment, Overrides, Schema};
//!
//! let schema = Schema::builtin()?;
//! let env = Environment::empty().with_var("MQTT_TOPICS", "greenhouse/#, barn/+/temp");
//!
//! match settings_for(&schema, "MQTT Broker", &Overrides::new(), &env)? {
//!     PlatformSettings::Mqtt(mqtt) => {
//!         assert_eq!(mqtt.port, 1883);
//!         assert_eq!(mqtt.topics, ["greenhouse/#", "barn/+/temp"]);
//!         assert!(mqtt.username.is_none());
//!     }
//!     other => panic!("unexpected {:?}", other.kind()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod cloud;
pub mod http;
pub mod mqtt;

use std::fmt;

use thiserror::Error;

use sensorhub_core::UnknownSensorTypeError;
use sensorhub_schemas::{
    Environment, Overrides, PlatformError, ResolvedPlatform, Schema, Secret,
};

pub use adapter::{FetchAdapter, SensorInfo, ValidatedHistory};
pub use cloud::{AwsIotSettings, AzureIotSettings};
pub use http::{ApiAuth, CustomApiSettings, ThingSpeakSettings};
pub use mqtt::MqttSettings;

/// Result type for settings conversion and adapter calls
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// A parameter the settings need is absent or empty
    #[error("Platform '{platform}' has no value for '{param}'")]
    Missing {
        /// Platform name
        platform: String,
        /// Parameter name
        param: &'static str,
    },

    /// A parameter has a value the platform cannot use
    #[error("Invalid value for '{param}': {reason}")]
    InvalidValue {
        /// Parameter name
        param: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Platform name is not one this crate has settings for
    #[error("Unsupported platform type: {0}")]
    UnsupportedPlatform(String),

    /// Lookup or required-parameter check failed
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Adapter returned a reading for a sensor type the schema lacks
    #[error(transparent)]
    UnknownSensorType(#[from] UnknownSensorTypeError),

    /// Adapter used before a successful connection test
    #[error("Not connected to {0}")]
    NotConnected(PlatformKind),

    /// Adapter-specific fetch failure
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// The platforms this crate knows how to configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    /// Amazon Web Services IoT Core
    AwsIot,
    /// Microsoft Azure IoT Hub
    AzureIot,
    /// ThingSpeak
    ThingSpeak,
    /// Generic MQTT broker
    Mqtt,
    /// Custom REST API
    CustomApi,
}

impl PlatformKind {
    /// Every supported platform
    pub const ALL: [PlatformKind; 5] = [
        PlatformKind::AwsIot,
        PlatformKind::AzureIot,
        PlatformKind::ThingSpeak,
        PlatformKind::Mqtt,
        PlatformKind::CustomApi,
    ];

    /// Map a schema platform name to its kind
    pub fn from_name(name: &str) -> ConnectorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ConnectorError::UnsupportedPlatform(name.to_string()))
    }

    /// Platform name as declared in the schema
    pub fn name(self) -> &'static str {
        match self {
            PlatformKind::AwsIot => "AWS IoT Core",
            PlatformKind::AzureIot => "Azure IoT Hub",
            PlatformKind::ThingSpeak => "ThingSpeak",
            PlatformKind::Mqtt => "MQTT Broker",
            PlatformKind::CustomApi => "Custom API",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed settings for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformSettings {
    /// AWS IoT Core
    AwsIot(AwsIotSettings),
    /// Azure IoT Hub
    AzureIot(AzureIotSettings),
    /// ThingSpeak
    ThingSpeak(ThingSpeakSettings),
    /// MQTT broker
    Mqtt(MqttSettings),
    /// Custom REST API
    CustomApi(CustomApiSettings),
}

impl PlatformSettings {
    /// Convert resolved parameters into the settings for their platform
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let settings = match PlatformKind::from_name(&resolved.platform)? {
            PlatformKind::AwsIot => Self::AwsIot(AwsIotSettings::from_resolved(resolved)?),
            PlatformKind::AzureIot => Self::AzureIot(AzureIotSettings::from_resolved(resolved)?),
            PlatformKind::ThingSpeak => {
                Self::ThingSpeak(ThingSpeakSettings::from_resolved(resolved)?)
            }
            PlatformKind::Mqtt => Self::Mqtt(MqttSettings::from_resolved(resolved)?),
            PlatformKind::CustomApi => Self::CustomApi(CustomApiSettings::from_resolved(resolved)?),
        };
        log::debug!("built {} settings", settings.kind());
        Ok(settings)
    }

    /// Platform these settings belong to
    pub fn kind(&self) -> PlatformKind {
        match self {
            Self::AwsIot(_) => PlatformKind::AwsIot,
            Self::AzureIot(_) => PlatformKind::AzureIot,
            Self::ThingSpeak(_) => PlatformKind::ThingSpeak,
            Self::Mqtt(_) => PlatformKind::Mqtt,
            Self::CustomApi(_) => PlatformKind::CustomApi,
        }
    }
}

/// Resolve, check and convert a platform's settings in one step
pub fn settings_for(
    schema: &Schema,
    name: &str,
    overrides: &Overrides,
    environment: &Environment,
) -> ConnectorResult<PlatformSettings> {
    let resolved = schema.check_platform(name, overrides, environment)?;
    PlatformSettings::from_resolved(&resolved)
}

// ===== PARAMETER ACCESS =====

/// Non-empty trimmed value, or `None`
pub(crate) fn optional(resolved: &ResolvedPlatform, param: &'static str) -> Option<String> {
    resolved
        .value(param)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Non-empty trimmed value, or `Missing`
pub(crate) fn required(resolved: &ResolvedPlatform, param: &'static str) -> ConnectorResult<String> {
    optional(resolved, param).ok_or_else(|| ConnectorError::Missing {
        platform: resolved.platform.clone(),
        param,
    })
}

/// Credential values are kept untrimmed
pub(crate) fn optional_secret(resolved: &ResolvedPlatform, param: &'static str) -> Option<Secret> {
    resolved
        .value(param)
        .map(|value| Secret::new(value))
        .filter(|secret| !secret.is_empty())
}

pub(crate) fn required_secret(resolved: &ResolvedPlatform, param: &'static str) -> ConnectorResult<Secret> {
    optional_secret(resolved, param).ok_or_else(|| ConnectorError::Missing {
        platform: resolved.platform.clone(),
        param,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in PlatformKind::ALL {
            assert_eq!(PlatformKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_unsupported() {
        let err = PlatformKind::from_name("LoRaWAN").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported platform type: LoRaWAN");
    }

    #[test]
    fn settings_for_propagates_missing_parameters() {
        let schema = Schema::builtin().unwrap();
        let err = settings_for(&schema, "ThingSpeak", &Overrides::new(), &Environment::empty())
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Platform(PlatformError::Missing(_))));
    }

    #[test]
    fn from_resolved_dispatches_on_platform_name() {
        let resolved = test_support::resolved(
            "Azure IoT Hub",
            &[
                ("AZURE_IOT_CONNECTION_STRING", "HostName=h;SharedAccessKey=k"),
                ("AZURE_IOT_HUB_NAME", "plant-hub"),
            ],
        );
        let settings = PlatformSettings::from_resolved(&resolved).unwrap();
        assert_eq!(settings.kind(), PlatformKind::AzureIot);
    }
}
