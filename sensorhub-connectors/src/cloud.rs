//! Managed cloud IoT hubs: AWS IoT Core and Azure IoT Hub

use sensorhub_schemas::{ResolvedPlatform, Secret};

use crate::{required, required_secret, ConnectorError, ConnectorResult};

/// Azure IoT Hub DNS suffix
pub const AZURE_HUB_SUFFIX: &str = "azure-devices.net";

/// Typed AWS IoT Core settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsIotSettings {
    /// Account-specific endpoint host (`xxxx-ats.iot.<region>.amazonaws.com`)
    pub endpoint: String,
    /// AWS region
    pub region: String,
    /// Access key id
    pub access_key: Secret,
    /// Secret access key
    pub secret_key: Secret,
}

impl AwsIotSettings {
    /// Convert the resolved `AWS IoT Core` parameters
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let endpoint = required(resolved, "endpoint")?;
        let endpoint = endpoint
            .strip_prefix("https://")
            .unwrap_or(&endpoint)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            endpoint,
            region: required(resolved, "region")?,
            access_key: required_secret(resolved, "access_key")?,
            secret_key: required_secret(resolved, "secret_key")?,
        })
    }

    /// HTTPS URL of the data endpoint
    pub fn endpoint_url(&self) -> String {
        format!("https://{}", self.endpoint)
    }
}

/// Typed Azure IoT Hub settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureIotSettings {
    /// `HostName=...;SharedAccessKeyName=...;SharedAccessKey=...`
    pub connection_string: Secret,
    /// Hub name, the first label of the hub host
    pub hub_name: String,
}

impl AzureIotSettings {
    /// Convert the resolved `Azure IoT Hub` parameters
    pub fn from_resolved(resolved: &ResolvedPlatform) -> ConnectorResult<Self> {
        let connection_string = required_secret(resolved, "connection_string")?;
        if !connection_string.expose().contains('=') {
            // Never echo the value itself
            return Err(ConnectorError::InvalidValue {
                param: "connection_string",
                reason: "expected semicolon-separated key=value pairs".to_string(),
            });
        }

        Ok(Self {
            connection_string,
            hub_name: required(resolved, "hub_name")?,
        })
    }

    /// Host name of the hub
    pub fn hub_host(&self) -> String {
        format!("{}.{}", self.hub_name, AZURE_HUB_SUFFIX)
    }
}
