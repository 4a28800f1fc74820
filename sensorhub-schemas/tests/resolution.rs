//! Resolution chain properties and the dashboard scenarios

use proptest::prelude::*;

use sensorhub_schemas::{
    resolve, resolve_channel, AlertChannelSettings, ChannelKind, ConnectionParamSpec,
    EmailSettings, Environment, Overrides, PlatformError, ResolutionSource, Schema, MASK,
};

fn spec(default: &str, sensitive: bool) -> ConnectionParamSpec {
    ConnectionParamSpec {
        name: "endpoint".to_string(),
        label: "Endpoint".to_string(),
        default: default.to_string(),
        env_var: "GATEWAY_ENDPOINT".to_string(),
        sensitive,
    }
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._:/-]{1,24}"
}

proptest! {
    #[test]
    fn non_empty_override_always_wins(
        override_value in value(),
        env_value in proptest::option::of(value()),
        default in "[a-z]{0,8}",
    ) {
        let spec = spec(&default, false);
        let overrides = Overrides::from([("endpoint".to_string(), override_value.clone())]);
        let mut env = Environment::empty();
        if let Some(env_value) = env_value {
            env = env.with_var("GATEWAY_ENDPOINT", env_value);
        }

        let resolved = resolve(&spec, &overrides, &env);
        prop_assert_eq!(resolved.value(), override_value.as_str());
        prop_assert_eq!(resolved.source, ResolutionSource::Override);
    }

    #[test]
    fn env_wins_without_override(env_value in value(), default in "[a-z]{0,8}") {
        let spec = spec(&default, false);
        let env = Environment::empty().with_var("GATEWAY_ENDPOINT", env_value.clone());

        let resolved = resolve(&spec, &Overrides::new(), &env);
        prop_assert_eq!(resolved.value(), env_value.as_str());
        prop_assert_eq!(resolved.source, ResolutionSource::Env);
    }

    #[test]
    fn default_closes_the_chain(default in "[a-z]{0,8}") {
        let resolved = resolve(&spec(&default, false), &Overrides::new(), &Environment::empty());
        prop_assert_eq!(resolved.value(), default.as_str());
        prop_assert_eq!(resolved.source, ResolutionSource::Default);
    }

    #[test]
    fn sensitive_values_never_rendered(secret in "[a-zA-Z0-9]{9,32}") {
        let env = Environment::empty().with_var("GATEWAY_ENDPOINT", secret.clone());
        let resolved = resolve(&spec("", true), &Overrides::new(), &env);

        prop_assert_eq!(resolved.value(), secret.as_str());
        for rendered in [
            resolved.diagnostic(),
            resolved.to_string(),
            format!("{:?}", resolved),
            serde_json::to_string(&resolved).unwrap(),
        ] {
            prop_assert!(!rendered.contains(&secret), "leaked in {}", rendered);
            prop_assert!(rendered.contains(MASK));
        }
    }

    #[test]
    fn resolve_all_is_idempotent(region in proptest::option::of(value()), endpoint in proptest::option::of(value())) {
        let schema = Schema::builtin().unwrap();
        let mut env = Environment::empty();
        if let Some(region) = region {
            env = env.with_var("AWS_REGION", region);
        }
        let mut overrides = Overrides::new();
        if let Some(endpoint) = endpoint {
            overrides.insert("endpoint".to_string(), endpoint);
        }

        let first = schema.resolve_all("AWS IoT Core", &overrides, &env).unwrap();
        let second = schema.resolve_all("AWS IoT Core", &overrides, &env).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn mqtt_broker_defaults() {
    let schema = Schema::builtin().unwrap();
    let params = schema
        .resolve_all("MQTT Broker", &Overrides::new(), &Environment::empty())
        .unwrap();

    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["broker", "port", "username", "password", "topics"]);

    assert_eq!(params[0].value(), "mqtt.eclipse.org");
    assert_eq!(params[0].source, ResolutionSource::Default);
    assert_eq!(params[1].value(), "1883");
    assert_eq!(params[1].source, ResolutionSource::Default);
}

#[test]
fn aws_region_from_environment_endpoint_missing() {
    let schema = Schema::builtin().unwrap();
    let env = Environment::empty().with_var("AWS_REGION", "eu-west-1");

    let params = schema.resolve_all("AWS IoT Core", &Overrides::new(), &env).unwrap();
    let region = params.iter().find(|p| p.name == "region").unwrap();
    assert_eq!(region.value(), "eu-west-1");
    assert_eq!(region.source, ResolutionSource::Env);

    let endpoint = params.iter().find(|p| p.name == "endpoint").unwrap();
    assert_eq!(endpoint.value(), "");
    assert_eq!(endpoint.source, ResolutionSource::Default);

    match schema.check_platform("AWS IoT Core", &Overrides::new(), &env) {
        Err(PlatformError::Missing(err)) => assert!(err.params.contains(&"endpoint".to_string())),
        other => panic!("expected missing parameters, got {:?}", other),
    }
}

#[test]
fn humidity_out_of_range() {
    let schema = Schema::builtin().unwrap();
    let result = schema.validate("humidity", 105.0).unwrap();
    assert!(!result.in_range);
    assert_eq!(result.clamped_hint, 100.0);
}

#[test]
fn email_without_recipients_is_inactive() {
    let settings = AlertChannelSettings::from_value(
        ChannelKind::Email,
        serde_json::json!({
            "enabled": true,
            "smtp_server": "smtp.example.com",
            "smtp_port": 587,
            "from_addr": "dash@example.com",
            "to_addrs": []
        }),
    );

    let resolution = resolve_channel(&settings);
    assert!(resolution.channel.enabled);
    assert!(!resolution.channel.active);
    let warning = resolution.warning.unwrap();
    assert_eq!(warning.kind, ChannelKind::Email);
    assert_eq!(warning.missing, vec!["to_addrs"]);

    let complete = EmailSettings {
        to_addrs: vec!["ops@example.com".to_string()],
        ..match settings {
            AlertChannelSettings::Email(email) => email,
            AlertChannelSettings::Sms(_) => unreachable!(),
        }
    };
    assert!(resolve_channel(&AlertChannelSettings::Email(complete)).channel.active);
}

#[test]
fn unknown_platform_is_reported() {
    let schema = Schema::builtin().unwrap();
    let err = schema.describe("Nonexistent Platform").unwrap_err();
    assert_eq!(err.name, "Nonexistent Platform");

    assert!(schema
        .resolve_all("Nonexistent Platform", &Overrides::new(), &Environment::empty())
        .is_err());
    assert!(matches!(
        schema.check_platform("Nonexistent Platform", &Overrides::new(), &Environment::empty()),
        Err(PlatformError::Unknown(_))
    ));
}
