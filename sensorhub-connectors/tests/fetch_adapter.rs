//! A stub adapter driven through the `FetchAdapter` contract

use std::collections::BTreeMap;

use sensorhub_connectors::{
    settings_for, ConnectorError, ConnectorResult, CustomApiSettings, FetchAdapter,
    PlatformKind, PlatformSettings, SensorInfo,
};
use sensorhub_core::{ReadingStatus, SensorReading, Timestamp};
use sensorhub_schemas::{Environment, Overrides, Schema};

/// Serves canned readings for the sensors behind a custom API
struct StubApi {
    settings: CustomApiSettings,
    connected: bool,
    readings: Vec<(String, SensorReading)>,
}

impl StubApi {
    fn new(settings: CustomApiSettings) -> Self {
        let readings = vec![
            ("api-co2-001".to_string(), SensorReading::new("co2", 820.0, 1_000)),
            ("api-co2-001".to_string(), SensorReading::new("co2", 5_400.0, 2_000)),
            ("api-temp-001".to_string(), SensorReading::new("temperature", 21.5, 2_000)),
            ("api-odd-001".to_string(), SensorReading::new("radiation", 0.2, 2_000)),
            ("api-mixed-001".to_string(), SensorReading::new("temperature", 22.0, 1_000)),
            ("api-mixed-001".to_string(), SensorReading::new("radiation", 0.3, 1_500)),
            ("api-mixed-001".to_string(), SensorReading::new("temperature", 180.0, 3_000)),
        ];
        Self {
            settings,
            connected: false,
            readings,
        }
    }
}

impl FetchAdapter for StubApi {
    fn kind(&self) -> PlatformKind {
        PlatformKind::CustomApi
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn test_connection(&mut self) -> ConnectorResult<()> {
        self.connected = !self.settings.base_url.is_empty();
        Ok(())
    }

    fn discover_sensors(&self) -> ConnectorResult<Vec<SensorInfo>> {
        self.ensure_connected()?;
        Ok(vec![SensorInfo {
            id: "api-co2-001".to_string(),
            name: "API CO2 Sensor 1".to_string(),
            sensor_type: "co2".to_string(),
            location: "Office".to_string(),
            metadata: BTreeMap::from([(
                "endpoint".to_string(),
                self.settings.endpoint("sensors/co2/1"),
            )]),
        }])
    }

    fn latest(&self, sensor_id: &str) -> ConnectorResult<SensorReading> {
        self.ensure_connected()?;
        self.readings
            .iter()
            .rev()
            .find(|(id, _)| id == sensor_id)
            .map(|(_, reading)| reading.clone())
            .ok_or_else(|| ConnectorError::Fetch(format!("no data for {}", sensor_id)))
    }

    fn history(
        &self,
        sensor_id: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> ConnectorResult<Vec<SensorReading>> {
        self.ensure_connected()?;
        Ok(self
            .readings
            .iter()
            .filter(|(id, r)| id == sensor_id && from <= r.timestamp && r.timestamp <= to)
            .map(|(_, reading)| reading.clone())
            .collect())
    }
}

fn connected_stub(schema: &Schema) -> StubApi {
    let settings = match settings_for(schema, "Custom API", &Overrides::new(), &Environment::empty())
        .unwrap()
    {
        PlatformSettings::CustomApi(settings) => settings,
        other => panic!("unexpected {:?}", other.kind()),
    };
    let mut stub = StubApi::new(settings);
    stub.test_connection().unwrap();
    stub
}

#[test]
fn calls_fail_before_connection_test() {
    let schema = Schema::builtin().unwrap();
    let settings = CustomApiSettings {
        base_url: "https://api.example.com".to_string(),
        auth: sensorhub_connectors::ApiAuth::None,
    };
    let stub = StubApi::new(settings);

    let err = stub.latest("api-co2-001").unwrap_err();
    assert!(matches!(err, ConnectorError::NotConnected(PlatformKind::CustomApi)));
    assert_eq!(err.to_string(), "Not connected to Custom API");
    assert!(stub.latest_validated(&schema, "api-co2-001").is_err());
}

#[test]
fn discovered_sensors_use_resolved_base_url() {
    let schema = Schema::builtin().unwrap();
    let sensors = connected_stub(&schema).discover_sensors().unwrap();
    assert_eq!(
        sensors[0].metadata["endpoint"],
        "https://api.example.com/sensors/co2/1"
    );
}

#[test]
fn out_of_range_latest_is_flagged_not_dropped() {
    let schema = Schema::builtin().unwrap();
    let validated = connected_stub(&schema)
        .latest_validated(&schema, "api-co2-001")
        .unwrap();

    assert_eq!(validated.reading.value, 5_400.0);
    assert_eq!(
        validated.status(),
        ReadingStatus::Flagged {
            clamped_hint: 5_000.0
        }
    );
}

#[test]
fn history_validates_every_reading() {
    let schema = Schema::builtin().unwrap();
    let history = connected_stub(&schema)
        .history_validated(&schema, "api-co2-001", 0, 10_000)
        .unwrap();

    let flagged: Vec<bool> = history.readings.iter().map(|r| r.is_flagged()).collect();
    assert_eq!(flagged, [false, true]);
    assert!(history.unknown.is_empty());
}

#[test]
fn unknown_type_in_history_keeps_the_rest() {
    let schema = Schema::builtin().unwrap();
    let history = connected_stub(&schema)
        .history_validated(&schema, "api-mixed-001", 0, 10_000)
        .unwrap();

    let values: Vec<f64> = history.readings.iter().map(|r| r.reading.value).collect();
    assert_eq!(values, [22.0, 180.0]);
    assert!(history.readings[1].is_flagged());

    assert_eq!(history.unknown.len(), 1);
    assert_eq!(history.unknown[0].sensor_type, "radiation");
    assert_eq!(history.unknown[0].timestamp, 1_500);
}

#[test]
fn inverted_window_is_rejected() {
    let schema = Schema::builtin().unwrap();
    let err = connected_stub(&schema)
        .history_validated(&schema, "api-co2-001", 10_000, 0)
        .unwrap_err();
    assert!(matches!(err, ConnectorError::InvalidValue { param: "to", .. }));
}

#[test]
fn unknown_sensor_type_surfaces_as_error() {
    let schema = Schema::builtin().unwrap();
    let err = connected_stub(&schema)
        .latest_validated(&schema, "api-odd-001")
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown sensor type: radiation");
}
