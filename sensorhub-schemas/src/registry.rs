//! Platform Connector Registry and sensor type lookups
//!
//! The read API the dashboard and the fetch adapters call on a loaded
//! [`Schema`]. Every method takes `&self`; a `Schema` behind an `Arc` can
//! be queried from any number of threads without locking.

use indexmap::IndexMap;
use serde::Serialize;

use sensorhub_core::{
    validators, SensorReading, SensorTypeDescriptor, UnknownSensorTypeError, ValidatedReading,
    ValidationResult,
};

use crate::{
    alerts::{resolve_channel, AlertChannelSettings, ChannelKind, ChannelResolution},
    environment::{Environment, Overrides},
    errors::{MissingParameterError, PlatformError, UnknownPlatformError},
    loader::Schema,
    platform::PlatformDescriptor,
    resolver::{ResolvedParam, Resolver},
};

/// Every parameter of one platform, resolved in declared order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlatform {
    /// Platform name
    pub platform: String,
    /// Resolved parameters in declared order
    pub params: Vec<ResolvedParam>,
}

impl ResolvedPlatform {
    /// Look up one resolved parameter
    pub fn get(&self, name: &str) -> Option<&ResolvedParam> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Raw value of one parameter
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(ResolvedParam::value)
    }

    /// Name to display value, sensitive values masked
    ///
    /// Safe to write to logs, configuration dumps or a settings page.
    pub fn export(&self) -> IndexMap<String, String> {
        self.params
            .iter()
            .map(|param| (param.name.clone(), param.display_value().into_owned()))
            .collect()
    }
}

impl Schema {
    // ===== PLATFORMS =====

    /// Platforms in declaration order
    pub fn list_platforms(&self) -> impl ExactSizeIterator<Item = &PlatformDescriptor> + '_ {
        self.platforms.values()
    }

    /// Platform names in declaration order
    pub fn platform_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.platforms.keys().map(String::as_str)
    }

    /// Look up a platform by exact name
    pub fn describe(&self, name: &str) -> Result<&PlatformDescriptor, UnknownPlatformError> {
        self.platforms.get(name).ok_or_else(|| UnknownPlatformError {
            name: name.to_string(),
        })
    }

    /// Resolve every parameter of a platform with the standard chain
    pub fn resolve_all(
        &self,
        name: &str,
        overrides: &Overrides,
        environment: &Environment,
    ) -> Result<Vec<ResolvedParam>, UnknownPlatformError> {
        self.resolve_all_with(name, &Resolver::standard(overrides, environment))
    }

    /// Resolve every parameter of a platform with a caller-built chain
    pub fn resolve_all_with(
        &self,
        name: &str,
        resolver: &Resolver<'_>,
    ) -> Result<Vec<ResolvedParam>, UnknownPlatformError> {
        let platform = self.describe(name)?;
        Ok(resolver.resolve_all(platform.params()))
    }

    /// Resolve a platform and require every non-optional parameter
    ///
    /// Used before a connectivity check: the error names each required
    /// parameter that resolved to an empty value, in declared order.
    pub fn check_platform(
        &self,
        name: &str,
        overrides: &Overrides,
        environment: &Environment,
    ) -> Result<ResolvedPlatform, PlatformError> {
        let platform = self.describe(name)?;
        let params = Resolver::standard(overrides, environment).resolve_all(platform.params());

        let missing: Vec<String> = platform
            .required_params()
            .filter(|spec| params.iter().any(|param| param.name == spec.name && param.is_empty()))
            .map(|spec| spec.name.clone())
            .collect();

        if !missing.is_empty() {
            let err = MissingParameterError {
                platform: platform.name.clone(),
                params: missing,
            };
            log::warn!("{}", err);
            return Err(err.into());
        }

        Ok(ResolvedPlatform {
            platform: platform.name.clone(),
            params,
        })
    }

    // ===== SENSOR TYPES =====

    /// Sensor types in declaration order
    pub fn list_sensor_types(&self) -> impl ExactSizeIterator<Item = &SensorTypeDescriptor> + '_ {
        self.sensor_types.values()
    }

    /// Look up a sensor type by key
    pub fn sensor_type(&self, key: &str) -> Result<&SensorTypeDescriptor, UnknownSensorTypeError> {
        self.sensor_types.get(key).ok_or_else(|| UnknownSensorTypeError {
            key: key.to_string(),
        })
    }

    /// Range-check a value for the sensor type named `key`
    pub fn validate(&self, key: &str, value: f64) -> Result<ValidationResult, UnknownSensorTypeError> {
        Ok(validators::validate(self.sensor_type(key)?, value))
    }

    /// Range-check a reading; the reading is carried through untouched
    pub fn validate_reading(
        &self,
        reading: SensorReading,
    ) -> Result<ValidatedReading, UnknownSensorTypeError> {
        let sensor_type = self.sensor_type(&reading.sensor_type)?;
        Ok(ValidatedReading::check(reading, sensor_type))
    }

    // ===== ALERTS =====

    /// Channel settings as declared in the `alerts` section
    pub fn alert_settings(&self, kind: ChannelKind) -> Option<&AlertChannelSettings> {
        self.alerts.iter().find(|settings| settings.kind() == kind)
    }

    /// Resolve every declared alert channel
    pub fn alert_channels(&self) -> Vec<ChannelResolution> {
        self.alerts.iter().map(resolve_channel).collect()
    }
}
