//! Alert Channel Configuration
//!
//! ## Overview
//!
//! The dashboard can notify over email and SMS. A channel is only
//! **active** when it is enabled *and* every field its kind requires is
//! filled in:
//!
//! | Kind    | Required                                                    |
//! |---------|-------------------------------------------------------------|
//! | `email` | `smtp_server`, `smtp_port` in 1–65535, `from_addr`, ≥1 `to_addrs` |
//! | `sms`   | `provider`, `api_key`, ≥1 `phone_numbers`                   |
//!
//! An enabled but incomplete channel does not fail startup. It comes back
//! inactive together with a [`ConfigIncompleteWarning`] naming the fields
//! that still need filling in.
//!
//! Field types are read leniently for the same reason. A port written as
//! `"587"` is accepted, a single recipient may be a plain string
//! (comma-separated for several), and a value of the wrong shape becomes
//! empty so it is reported as missing instead of failing the load.
//!
//! ```rust
//! use sensorhub_schemas::alerts::{resolve_channel, AlertChannelSettings, EmailSettings};
//!
//! let email = EmailSettings {
//!     enabled: true,
//!     smtp_server: "smtp.example.com".into(),
//!     from_addr: "dash@example.com".into(),
//!     ..EmailSettings::default()
//! };
//!
//! let resolution = resolve_channel(&AlertChannelSettings::Email(email));
//! assert!(!resolution.channel.active);
//! assert_eq!(resolution.warning.unwrap().missing, vec!["to_addrs"]);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{errors::ConfigIncompleteWarning, masking::Secret};

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: i64 = 587;

/// Notification mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// SMTP email
    Email,
    /// SMS gateway
    Sms,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Email => f.write_str("email"),
            ChannelKind::Sms => f.write_str("sms"),
        }
    }
}

/// Email channel fields as written in the schema or a settings form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Requested on/off state
    #[serde(deserialize_with = "lenient::flag")]
    pub enabled: bool,
    /// SMTP host
    #[serde(deserialize_with = "lenient::text")]
    pub smtp_server: String,
    /// SMTP port; kept wide so invalid values are reported, not rejected
    #[serde(deserialize_with = "lenient::port")]
    pub smtp_port: i64,
    /// SMTP login
    #[serde(deserialize_with = "lenient::text")]
    pub username: String,
    /// SMTP password
    #[serde(deserialize_with = "lenient::secret")]
    pub password: Secret,
    /// Sender address
    #[serde(deserialize_with = "lenient::text")]
    pub from_addr: String,
    /// Recipient addresses
    #[serde(deserialize_with = "lenient::list")]
    pub to_addrs: Vec<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: Secret::default(),
            from_addr: String::new(),
            to_addrs: Vec::new(),
        }
    }
}

/// SMS channel fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsSettings {
    /// Requested on/off state
    #[serde(deserialize_with = "lenient::flag")]
    pub enabled: bool,
    /// SMS gateway provider name
    #[serde(deserialize_with = "lenient::text")]
    pub provider: String,
    /// Provider API key
    #[serde(deserialize_with = "lenient::secret")]
    pub api_key: Secret,
    /// Recipient numbers
    #[serde(deserialize_with = "lenient::list")]
    pub phone_numbers: Vec<String>,
}

/// Settings for one channel, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertChannelSettings {
    /// Email channel
    Email(EmailSettings),
    /// SMS channel
    Sms(SmsSettings),
}

impl AlertChannelSettings {
    /// Read untyped settings (e.g. a submitted form) for the given kind
    ///
    /// Never fails. Anything other than a mapping leaves the channel
    /// disabled; mistyped fields come back empty.
    pub fn from_value(kind: ChannelKind, value: Value) -> Self {
        if !value.is_object() {
            if !value.is_null() {
                log::warn!("{} alert settings are not a mapping; channel left disabled", kind);
            }
            return Self::disabled(kind);
        }

        let parsed = match kind {
            ChannelKind::Email => serde_json::from_value(value).map(AlertChannelSettings::Email),
            ChannelKind::Sms => serde_json::from_value(value).map(AlertChannelSettings::Sms),
        };
        parsed.unwrap_or_else(|err| {
            log::warn!("unreadable {} alert settings ({}); channel left disabled", kind, err);
            Self::disabled(kind)
        })
    }

    /// Default, disabled settings for a kind
    pub fn disabled(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Email => AlertChannelSettings::Email(EmailSettings::default()),
            ChannelKind::Sms => AlertChannelSettings::Sms(SmsSettings::default()),
        }
    }

    /// Channel kind
    pub fn kind(&self) -> ChannelKind {
        match self {
            AlertChannelSettings::Email(_) => ChannelKind::Email,
            AlertChannelSettings::Sms(_) => ChannelKind::Sms,
        }
    }

    /// Requested on/off state
    pub fn enabled(&self) -> bool {
        match self {
            AlertChannelSettings::Email(email) => email.enabled,
            AlertChannelSettings::Sms(sms) => sms.enabled,
        }
    }

    /// Required fields that are empty or invalid, in a fixed order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self {
            AlertChannelSettings::Email(email) => {
                if is_blank(&email.smtp_server) {
                    missing.push("smtp_server");
                }
                if !(1..=65535).contains(&email.smtp_port) {
                    missing.push("smtp_port");
                }
                if is_blank(&email.from_addr) {
                    missing.push("from_addr");
                }
                if !has_entry(&email.to_addrs) {
                    missing.push("to_addrs");
                }
            }
            AlertChannelSettings::Sms(sms) => {
                if is_blank(&sms.provider) {
                    missing.push("provider");
                }
                if sms.api_key.is_empty() {
                    missing.push("api_key");
                }
                if !has_entry(&sms.phone_numbers) {
                    missing.push("phone_numbers");
                }
            }
        }
        missing
    }
}

/// A channel after completeness checking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertChannelConfig {
    /// Channel kind
    pub kind: ChannelKind,
    /// Requested on/off state
    pub enabled: bool,
    /// Enabled and complete; only active channels may send
    pub active: bool,
    /// The settings the decision was made on
    pub settings: AlertChannelSettings,
}

/// Result of resolving a channel: never an error, at most a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResolution {
    /// The resolved channel
    pub channel: AlertChannelConfig,
    /// Present when the channel is enabled but incomplete
    pub warning: Option<ConfigIncompleteWarning>,
}

/// Decide whether a channel may be active
pub fn resolve_channel(settings: &AlertChannelSettings) -> ChannelResolution {
    let kind = settings.kind();
    let enabled = settings.enabled();
    let missing = settings.missing_fields();

    let warning = if enabled && !missing.is_empty() {
        let warning = ConfigIncompleteWarning { kind, missing };
        log::warn!("{}", warning);
        Some(warning)
    } else {
        None
    };

    ChannelResolution {
        channel: AlertChannelConfig {
            kind,
            enabled,
            active: enabled && warning.is_none(),
            settings: settings.clone(),
        },
        warning,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_entry(values: &[String]) -> bool {
    values.iter().any(|value| !is_blank(value))
}

/// Field readers that never reject a value of the wrong type
mod lenient {
    use super::*;

    pub(super) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(flag) => flag,
            Value::Number(number) => number.as_i64() == Some(1),
            Value::String(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "on" | "1"
            ),
            _ => false,
        })
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(scalar(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub(super) fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Secret, D::Error> {
        text(deserializer).map(Secret::new)
    }

    /// Out-of-range ports are kept so they are reported; unreadable ones become `0`
    pub(super) fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => DEFAULT_SMTP_PORT,
            Value::Number(number) => number.as_i64().unwrap_or(0),
            Value::String(text) => text.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub(super) fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().filter_map(scalar).collect(),
            Value::String(text) => text
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            Value::Number(number) => vec![number.to_string()],
            _ => Vec::new(),
        })
    }

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}
