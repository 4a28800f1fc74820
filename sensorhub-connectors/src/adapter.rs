//! The contract external fetch adapters implement

use std::collections::BTreeMap;

use serde::Serialize;

use sensorhub_core::{SensorReading, Timestamp, ValidatedReading};
use sensorhub_schemas::Schema;

use crate::{ConnectorError, ConnectorResult, PlatformKind};

/// A sensor an adapter found on its platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorInfo {
    /// Platform-unique sensor id (e.g. "aws-temp-001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Sensor type key in the schema (e.g. "temperature")
    pub sensor_type: String,
    /// Free-form location
    pub location: String,
    /// Vendor metadata (model, firmware, endpoint, ...)
    pub metadata: BTreeMap<String, String>,
}

/// A history window after range checking
///
/// Readings whose sensor type the schema lacks are kept aside in
/// `unknown`; they do not discard the rest of the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatedHistory {
    /// Readings checked against their sensor type, in fetch order
    pub readings: Vec<ValidatedReading>,
    /// Readings for sensor types missing from the schema
    pub unknown: Vec<SensorReading>,
}

/// A data source for one platform
///
/// Implementations live outside this crate and own all network I/O.
/// Calls other than [`test_connection`](FetchAdapter::test_connection)
/// should fail with [`ConnectorError::NotConnected`] until a connection
/// test has succeeded.
pub trait FetchAdapter {
    /// Platform this adapter talks to
    fn kind(&self) -> PlatformKind;

    /// Whether the last connection test succeeded
    fn is_connected(&self) -> bool;

    /// Try to reach the platform with the adapter's settings
    fn test_connection(&mut self) -> ConnectorResult<()>;

    /// Sensors visible on the platform
    fn discover_sensors(&self) -> ConnectorResult<Vec<SensorInfo>>;

    /// Most recent reading of one sensor
    fn latest(&self, sensor_id: &str) -> ConnectorResult<SensorReading>;

    /// Readings of one sensor with `from <= timestamp <= to`
    fn history(
        &self,
        sensor_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> ConnectorResult<Vec<SensorReading>>;

    /// Fail with `NotConnected` unless a connection test has succeeded
    fn ensure_connected(&self) -> ConnectorResult<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ConnectorError::NotConnected(self.kind()))
        }
    }

    /// Fetch the latest reading and range-check it against the schema
    ///
    /// Out-of-range readings come back flagged, never dropped.
    fn latest_validated(&self, schema: &Schema, sensor_id: &str) -> ConnectorResult<ValidatedReading> {
        let reading = self.latest(sensor_id)?;
        Ok(schema.validate_reading(reading)?)
    }

    /// Fetch a window of history and range-check every reading
    fn history_validated(
        &self,
        schema: &Schema,
        sensor_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> ConnectorResult<ValidatedHistory> {
        if to < from {
            return Err(ConnectorError::InvalidValue {
                param: "to",
                reason: format!("window end {} is before start {}", to, from),
            });
        }

        let mut history = ValidatedHistory::default();
        for reading in self.history(sensor_id, from, to)? {
            match schema.sensor_type(&reading.sensor_type) {
                Ok(sensor_type) => history
                    .readings
                    .push(ValidatedReading::check(reading, sensor_type)),
                Err(err) => {
                    log::warn!("{}: {}; reading kept aside", sensor_id, err);
                    history.unknown.push(reading);
                }
            }
        }
        Ok(history)
    }
}
