//! Integration test: gateway models validated end to end against the builtin
//! schemas.

use gwm_core::KeyBytes;
use gwm_models::{
    ChallengeKey, ChallengeKeyError, GatewayDevice, MagmadGateway, ModelError, NetworkDnsConfig,
    NetworkDnsRecords, NetworkFeatures, ValidateModel,
};
use gwm_schema::{SchemaValidationError, SchemaValidator};
use p256::pkcs8::EncodePublicKey as _;
use serde_json::json;

fn schemas() -> SchemaValidator {
    SchemaValidator::builtin().expect("builtin schemas compile")
}

fn p256_key_base64() -> String {
    let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
    let der = secret.public_key().to_public_key_der().unwrap();
    KeyBytes::new(der.as_bytes()).to_base64()
}

fn violation_paths(err: &ModelError) -> Vec<String> {
    match err.as_schema() {
        Some(SchemaValidationError::ValidationFailed { violations, .. }) => violations
            .violations()
            .iter()
            .map(|v| v.instance_path.clone())
            .collect(),
        _ => panic!("Expected structural failure, got: {err}"),
    }
}

#[test]
fn test_registered_ecdsa_device_is_accepted() {
    let device: GatewayDevice = serde_json::from_value(json!({
        "hardware_id": "5e3c7d0a-9f5b-4d27-a2a1-6f3b2c1d9e80",
        "key": {"key_type": "SOFTWARE_ECDSA_SHA256", "key": p256_key_base64()}
    }))
    .unwrap();
    device.validate_model(&schemas()).unwrap();
}

#[test]
fn test_echo_device_is_accepted() {
    let device: GatewayDevice = serde_json::from_value(json!({
        "hardware_id": "5e3c7d0a-9f5b-4d27-a2a1-6f3b2c1d9e80",
        "key": {"key_type": "ECHO"}
    }))
    .unwrap();
    device.validate_model(&schemas()).unwrap();
}

#[test]
fn test_key_error_masks_structural_error() {
    // Empty hardware_id breaks the schema, but the key is checked first.
    let device: GatewayDevice = serde_json::from_value(json!({
        "hardware_id": "",
        "key": {"key_type": "ECHO", "key": p256_key_base64()}
    }))
    .unwrap();
    let err = device.validate_model(&schemas()).unwrap_err();
    assert_eq!(
        err.as_challenge_key(),
        Some(&ChallengeKeyError::UnexpectedKeyPresent)
    );
    assert_eq!(err.to_string(), "ECHO mode should not have key value");
}

#[test]
fn test_structural_error_reported_once_key_is_valid() {
    let device: GatewayDevice = serde_json::from_value(json!({
        "hardware_id": "",
        "key": {"key_type": "ECHO"}
    }))
    .unwrap();
    let err = device.validate_model(&schemas()).unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/hardware_id".to_string()]);
}

#[test]
fn test_unknown_key_type_rejected_before_schema_enum() {
    let device = GatewayDevice::new("hw-1", ChallengeKey::new("TPM_ECDSA", None));
    let err = device.validate_model(&schemas()).unwrap_err();
    assert_eq!(err.to_string(), "Unknown key type TPM_ECDSA");
}

#[test]
fn test_malformed_key_surfaces_decode_cause() {
    let device: GatewayDevice = serde_json::from_value(json!({
        "hardware_id": "hw-1",
        "key": {"key_type": "SOFTWARE_ECDSA_SHA256", "key": "aGVsbG8gd29ybGQ="}
    }))
    .unwrap();
    let err = device.validate_model(&schemas()).unwrap_err();
    assert!(matches!(
        err.as_challenge_key(),
        Some(ChallengeKeyError::MalformedKey(_))
    ));
    assert!(
        err.to_string().starts_with("Failed to parse key: "),
        "got: {err}"
    );
}

#[test]
fn test_full_gateway_is_accepted() {
    let gateway: MagmadGateway = serde_json::from_value(json!({
        "id": "gw_site_01",
        "name": "Site 01",
        "description": "rooftop",
        "tier": "default",
        "device": {
            "hardware_id": "5e3c7d0a-9f5b-4d27-a2a1-6f3b2c1d9e81",
            "key": {"key_type": "SOFTWARE_ECDSA_SHA256", "key": p256_key_base64()}
        },
        "magmad": {
            "autoupgrade_enabled": true,
            "autoupgrade_poll_interval": 300,
            "checkin_interval": 60,
            "checkin_timeout": 30,
            "dynamic_services": ["monitord"],
            "feature_flags": {"newfeature1": true}
        }
    }))
    .unwrap();
    gateway.validate_model(&schemas()).unwrap();
}

#[test]
fn test_gateway_structural_errors_after_device() {
    let gateway: MagmadGateway = serde_json::from_value(json!({
        "id": "Not Valid",
        "name": "",
        "description": "",
        "tier": "default",
        "device": {"hardware_id": "hw-1", "key": {"key_type": "ECHO"}},
        "magmad": {
            "autoupgrade_enabled": false,
            "autoupgrade_poll_interval": 300,
            "checkin_interval": 0,
            "checkin_timeout": 30
        }
    }))
    .unwrap();
    let err = gateway.validate_model(&schemas()).unwrap_err();
    let mut paths = violation_paths(&err);
    paths.sort();
    assert_eq!(paths, vec!["/id", "/magmad/checkin_interval", "/name"]);
}

#[test]
fn test_dns_config_ranges_and_formats() {
    let cfg: NetworkDnsConfig = serde_json::from_value(json!({
        "enable_caching": true,
        "local_ttl": -5,
        "records": [{"domain": "a.example.com", "aaaa_record": ["not-an-address"]}]
    }))
    .unwrap();
    let err = cfg.validate_model(&schemas()).unwrap_err();
    let mut paths = violation_paths(&err);
    paths.sort();
    assert_eq!(paths, vec!["/local_ttl", "/records/0/aaaa_record/0"]);
}

#[test]
fn test_dns_records_require_domain() {
    let records: NetworkDnsRecords =
        serde_json::from_value(json!([{"domain": ""}, {"domain": "ok.example.com"}])).unwrap();
    let err = records.validate_model(&schemas()).unwrap_err();
    assert_eq!(violation_paths(&err), vec!["/0/domain".to_string()]);
}

#[test]
fn test_network_features_accepted() {
    let features: NetworkFeatures =
        serde_json::from_value(json!({"features": {"lte": "enabled"}})).unwrap();
    features.validate_model(&schemas()).unwrap();
}

#[test]
fn test_models_are_uniform_behind_the_trait() {
    let models: Vec<Box<dyn ValidateModel>> = vec![
        Box::new(ChallengeKey::echo()),
        Box::new(GatewayDevice::new("hw-1", ChallengeKey::echo())),
        Box::new(NetworkFeatures::default()),
        Box::new(NetworkDnsRecords::default()),
    ];
    let schemas = schemas();
    for model in &models {
        model.validate_model(&schemas).unwrap();
    }
}

#[test]
fn test_parallel_validation_shares_one_registry() {
    let schemas = schemas();
    let registry = &schemas;
    let devices: Vec<GatewayDevice> = (0..8)
        .map(|i| {
            let key = if i % 2 == 0 {
                ChallengeKey::echo()
            } else {
                ChallengeKey::new("SOFTWARE_ECDSA_SHA256", None)
            };
            GatewayDevice::new(format!("hw-{i}"), key)
        })
        .collect();

    let results: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = devices
            .iter()
            .map(|d| s.spawn(move || d.validate_model(registry).is_ok()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: Vec<bool> = (0..8).map(|i| i % 2 == 0).collect();
    assert_eq!(results, expected);
}
