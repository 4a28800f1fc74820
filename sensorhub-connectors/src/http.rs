//! HTTP platforms: a custom REST API and ThingSpeak
//!
//! ## Authentication
//!
//! A custom API may be open, key-protected or behind basic auth. When
//! both an API key and a username are configured the key wins:
//!
//! | `api_key` | `username` | [`ApiAuth`]        |
//! |-----------|------------|--------------------|
//! | set       | any        | `ApiKey`           |
//! | empty     | set        | `Basic`            |
//! | empty     | empty      | `None`             |
//!
//! With the `http` feature, [`CustomApiSettings::request`] turns this into
//! a `ureq` request carrying the matching header.

use sensorhub_schemas::{ResolvedPlatform, Secret};

use crate::{optional, optional_secret, required, required_secret, ConnectorError, ConnectorResult};

/// ThingSpeak REST root
pub const THINGSPEAK_BASE_URL: &str = "https://api.thingspeak.com";

/// Header carrying the custom API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// How requests to a custom API authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuth {
    /// Open endpoint
    None,
    /// Key sent in [`API_KEY_HEADER`]
    ApiKey(Secret),
    /// HTTP basic auth
    Basic {
        /// Login
        username: String,
        /// Password, empty when unset
        password: Secret,
    },
}

/// Typed custom REST API settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomApiSettings {
    /// `http(s)://` root without a trailing slash
    pub base_url: String,
    /// Authentication scheme
    pub auth: ApiAuth,
}

impl CustomApiSettings {
    /// Convert the resolved `Custom API` parameters
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let base_url = required(resolved, "base_url")?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConnectorError::InvalidValue {
                param: "base_url",
                reason: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        let auth = match (optional_secret(resolved, "api_key"), optional(resolved, "username")) {
            (Some(key), _) => ApiAuth::ApiKey(key),
            (None, Some(username)) => ApiAuth::Basic {
                username,
                password: optional_secret(resolved, "password").unwrap_or_default(),
            },
            (None, None) => ApiAuth::None,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Absolute URL for `path`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// An unsent `ureq` request with authentication applied
    #[cfg(feature = "http")]
    pub fn request(&self, method: &str, path: &str) -> ureq::Request {
        use base64::Engine;

        let request = ureq::request(method, &self.endpoint(path));
        match &self.auth {
            ApiAuth::None => request,
            ApiAuth::ApiKey(key) => request.set(API_KEY_HEADER, key.expose()),
            ApiAuth::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password.expose());
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                request.set("Authorization", &format!("Basic {}", encoded))
            }
        }
    }
}

/// Typed ThingSpeak settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingSpeakSettings {
    /// Read API key
    pub api_key: Secret,
    /// Numeric channel id
    pub channel_id: u64,
}

impl ThingSpeakSettings {
    /// Convert the resolved `ThingSpeak` parameters
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let api_key = required_secret(resolved, "api_key")?;
        let raw = required(resolved, "channel_id")?;
        let channel_id = raw.parse().map_err(|_| ConnectorError::InvalidValue {
            param: "channel_id",
            reason: format!("'{}' is not a numeric channel id", raw),
        })?;
        Ok(Self { api_key, channel_id })
    }

    /// Feed URL for this channel (the key goes in the query at request time)
    pub fn feed_url(&self) -> String {
        format!("{}/channels/{}/feeds.json", THINGSPEAK_BASE_URL, self.channel_id)
    }
}
