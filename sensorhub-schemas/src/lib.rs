//! Dashboard Schema, Parameter Resolution and Alert Configuration
//!
//! ## Overview
//!
//! A SensorHub dashboard is driven by one static schema document. It
//! declares the IoT platforms the dashboard can connect to, the sensor
//! types it displays and the alert channels it may notify through:
//!
//! ```yaml
//! app:
//!   name: IoT Sensor Dashboard
//!   refresh_interval: 5
//! platforms:
//!   MQTT Broker:
//!     description: Generic MQTT broker
//!     connection_params:
//!       broker: {label: Broker Address, default: mqtt.eclipse.org, env_var: MQTT_BROKER}
//!       password: {label: Password (optional), env_var: MQTT_PASSWORD, sensitive: true}
//! sensor_types:
//!   humidity: {name: Humidity, unit: "%", icon: droplet, min: 0, max: 100}
//! alerts:
//!   email: {enabled: false}
//! ```
//!
//! This crate turns that document into an immutable [`Schema`] and answers
//! every configuration question the dashboard asks at runtime:
//!
//! | Question                                  | Call                              |
//! |-------------------------------------------|-----------------------------------|
//! | Which platforms exist?                    | [`Schema::list_platforms`]        |
//! | What does platform X need?                | [`Schema::describe`]              |
//! | What are X's effective parameters?        | [`Schema::resolve_all`]           |
//! | Is X ready for a connectivity check?      | [`Schema::check_platform`]        |
//! | Which sensor types exist?                 | [`Schema::list_sensor_types`]     |
//! | Is this reading in range?                 | [`Schema::validate`]              |
//! | May this alert channel send?              | [`resolve_channel`]               |
//!
//! ## Resolution
//!
//! Each connection parameter resolves from an override (e.g. a setup
//! form), then the environment variable named in the schema, then the
//! schema default. See [`resolver`] for the chain and how to extend it.
//!
//! ## Secrets
//!
//! Parameters flagged `sensitive` never appear in plaintext in logs,
//! `Debug` output or serialized exports. See [`masking`].
//!
//! ## Usage Example
//!
//! ```rust
//! use sensorhub_schemas::{Environment, Overrides, ResolutionSource, Schema};
//!
//! let schema = Schema::builtin()?;
//! let env = Environment::empty().with_var("AWS_REGION", "eu-west-1");
//!
//! let params = schema.resolve_all("AWS IoT Core", &Overrides::new(), &env)?;
//! let region = params.iter().find(|p| p.name == "region").unwrap();
//! assert_eq!(region.value(), "eu-west-1");
//! assert_eq!(region.source, ResolutionSource::Env);
//!
//! let check = schema.validate("humidity", 105.0)?;
//! assert!(!check.in_range);
//! assert_eq!(check.clamped_hint, 100.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alerts;
pub mod app;
pub mod environment;
pub mod errors;
pub mod loader;
pub mod masking;
pub mod platform;
pub mod registry;
pub mod resolver;
pub mod schemas;

pub use alerts::{
    resolve_channel, AlertChannelConfig, AlertChannelSettings, ChannelKind, ChannelResolution,
    EmailSettings, SmsSettings,
};
pub use app::AppSettings;
pub use environment::{Environment, Overrides};
pub use errors::{
    ConfigIncompleteWarning, EnvironmentError, MissingParameterError, PlatformError, SchemaError,
    SchemaResult, UnknownPlatformError,
};
pub use loader::{Schema, SchemaFormat};
pub use masking::{Secret, MASK};
pub use platform::{ConnectionParamSpec, PlatformDescriptor};
pub use registry::ResolvedPlatform;
pub use resolver::{resolve, ParamSource, ResolutionSource, ResolvedParam, Resolver};
