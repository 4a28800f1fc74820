//! Schema Loader
//!
//! Parses a schema document (JSON or YAML) into an immutable [`Schema`].
//! Loading is the one place a malformed document is reported; once a
//! `Schema` exists every descriptor in it satisfies its invariants:
//!
//! - every platform has at least one connection parameter
//! - every parameter has a non-blank `label` and a valid `env_var` identifier
//! - no sensitive parameter ships a non-empty default
//! - every sensor type has a finite range with `min <= max`
//!
//! Declaration order of platforms, parameters and sensor types is kept.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use sensorhub_core::{RangeError, SensorTypeDescriptor};

use crate::{
    alerts::{AlertChannelSettings, ChannelKind},
    app::AppSettings,
    errors::{SchemaError, SchemaResult},
    platform::{is_valid_env_var, ConnectionParamSpec, PlatformDescriptor},
    schemas,
};

/// Supported document syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl SchemaFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(SchemaFormat::Json),
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            _ => Err(SchemaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Immutable, validated dashboard schema
///
/// Built once at startup and shared by reference (or `Arc`) with every
/// request handler; it has no interior mutability.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) app: AppSettings,
    pub(crate) platforms: IndexMap<String, PlatformDescriptor>,
    pub(crate) sensor_types: IndexMap<String, SensorTypeDescriptor>,
    pub(crate) alerts: Vec<AlertChannelSettings>,
}

impl Schema {
    /// Parse a document in the given format
    pub fn load(document: &str, format: SchemaFormat) -> SchemaResult<Self> {
        match format {
            SchemaFormat::Json => Self::from_json_str(document),
            SchemaFormat::Yaml => Self::from_yaml_str(document),
        }
    }

    /// Parse a JSON document
    pub fn from_json_str(document: &str) -> SchemaResult<Self> {
        Self::from_raw(serde_json::from_str(document)?)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(document: &str) -> SchemaResult<Self> {
        Self::from_raw(serde_yaml::from_str(document)?)
    }

    /// Build from an already-parsed JSON value
    pub fn from_value(document: serde_json::Value) -> SchemaResult<Self> {
        Self::from_raw(serde_json::from_value(document)?)
    }

    /// Read and parse a schema file; the extension selects the format
    pub fn from_path(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let format = SchemaFormat::from_path(path)?;
        let document = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading schema from {}", path.display());
        Self::load(&document, format)
    }

    /// The built-in default schema
    pub fn builtin() -> SchemaResult<Self> {
        Self::from_value(schemas::default_document())
    }

    /// Dashboard-wide settings
    pub fn app(&self) -> &AppSettings {
        &self.app
    }

    fn from_raw(raw: RawSchema) -> SchemaResult<Self> {
        let raw_platforms = raw.platforms.ok_or(SchemaError::MissingSection("platforms"))?;
        let raw_sensors = raw
            .sensor_types
            .ok_or(SchemaError::MissingSection("sensor_types"))?;

        let mut platforms = IndexMap::with_capacity(raw_platforms.len());
        for (name, platform) in raw_platforms {
            let descriptor = build_platform(&name, platform)?;
            platforms.insert(name, descriptor);
        }

        let mut sensor_types = IndexMap::with_capacity(raw_sensors.len());
        for (key, sensor) in raw_sensors {
            let descriptor = build_sensor_type(&key, sensor)?;
            sensor_types.insert(key, descriptor);
        }

        let schema = Schema {
            app: raw.app,
            platforms,
            sensor_types,
            alerts: [ChannelKind::Email, ChannelKind::Sms]
                .into_iter()
                .map(|kind| {
                    let settings = raw.alerts.get(kind.to_string()).cloned().unwrap_or_default();
                    AlertChannelSettings::from_value(kind, settings)
                })
                .collect(),
        };

        log::info!(
            "loaded schema '{}' v{}: {} platforms, {} sensor types",
            schema.app.name,
            schema.app.version,
            schema.platforms.len(),
            schema.sensor_types.len()
        );
        Ok(schema)
    }
}

fn build_platform(name: &str, raw: RawPlatform) -> SchemaResult<PlatformDescriptor> {
    if raw.connection_params.is_empty() {
        return Err(SchemaError::NoConnectionParams {
            platform: name.to_string(),
        });
    }

    let mut connection_params = IndexMap::with_capacity(raw.connection_params.len());
    for (param, spec) in raw.connection_params {
        let spec = build_param(name, &param, spec)?;
        connection_params.insert(param, spec);
    }

    Ok(PlatformDescriptor {
        name: name.to_string(),
        description: raw.description,
        connection_params,
    })
}

fn build_param(platform: &str, param: &str, raw: RawParam) -> SchemaResult<ConnectionParamSpec> {
    let missing = |field| SchemaError::MissingField {
        platform: platform.to_string(),
        param: param.to_string(),
        field,
    };

    let label = raw
        .label
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| missing("label"))?;
    let env_var = raw.env_var.ok_or_else(|| missing("env_var"))?;
    if !is_valid_env_var(&env_var) {
        return Err(SchemaError::InvalidEnvVar {
            platform: platform.to_string(),
            param: param.to_string(),
            env_var,
        });
    }

    let default = raw.default.map(|value| value.to_string()).unwrap_or_default();
    if raw.sensitive && !default.is_empty() {
        return Err(SchemaError::SensitiveDefault {
            platform: platform.to_string(),
            param: param.to_string(),
        });
    }

    Ok(ConnectionParamSpec {
        name: param.to_string(),
        label,
        default,
        env_var,
        sensitive: raw.sensitive,
    })
}

fn build_sensor_type(key: &str, raw: RawSensorType) -> SchemaResult<SensorTypeDescriptor> {
    let missing = |field| SchemaError::MissingSensorField {
        sensor: key.to_string(),
        field,
    };
    let min = raw.min.ok_or_else(|| missing("min"))?;
    let max = raw.max.ok_or_else(|| missing("max"))?;
    let label = raw.name.unwrap_or_else(|| key.to_string());

    SensorTypeDescriptor::new(key, label, raw.unit, raw.icon, min, max).map_err(|err| match err {
        RangeError::Inverted { min, max } => SchemaError::InvertedRange {
            sensor: key.to_string(),
            min,
            max,
        },
        RangeError::NotFinite => SchemaError::NonFiniteRange {
            sensor: key.to_string(),
        },
    })
}

// ===== RAW DOCUMENT SHAPE =====

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    app: AppSettings,
    platforms: Option<IndexMap<String, RawPlatform>>,
    sensor_types: Option<IndexMap<String, RawSensorType>>,
    /// Read per channel so a malformed channel never fails the load
    #[serde(default)]
    alerts: serde_json::Value,
}

#[derive(Deserialize)]
struct RawPlatform {
    #[serde(default)]
    description: String,
    #[serde(default)]
    connection_params: IndexMap<String, RawParam>,
}

#[derive(Deserialize)]
struct RawParam {
    label: Option<String>,
    default: Option<Scalar>,
    env_var: Option<String>,
    #[serde(default)]
    sensitive: bool,
}

#[derive(Deserialize)]
struct RawSensorType {
    name: Option<String>,
    #[serde(default)]
    unit: String,
    icon: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Defaults may be written as strings, numbers or booleans
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Bool(value) => write!(f, "{}", value),
        }
    }
}
