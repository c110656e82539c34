//! # Gateway Models
//!
//! `GatewayDevice` and `MagmadGateway` are composites: each exclusively owns
//! the model below it and validates it first. `MagmadGatewayConfigs` is a
//! leaf that only carries structural constraints.
//!
//! ```text
//! MagmadGateway ──owns──▶ GatewayDevice ──owns──▶ ChallengeKey
//!       │
//!       └──owns──▶ MagmadGatewayConfigs
//! ```

use std::collections::BTreeMap;

use gwm_core::{GatewayId, HardwareId, TierId};
use gwm_schema::StructuralValidator;
use serde::{Deserialize, Serialize};

use crate::challenge_key::ChallengeKey;
use crate::error::ModelError;
use crate::validate::{SchemaModel, ValidateModel};

/// A physical gateway and the key it authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDevice {
    /// Hardware identifier reported by the device.
    pub hardware_id: HardwareId,
    /// Challenge key the device authenticates with.
    pub key: ChallengeKey,
}

impl GatewayDevice {
    /// Build a device descriptor.
    pub fn new(hardware_id: impl Into<HardwareId>, key: ChallengeKey) -> Self {
        Self {
            hardware_id: hardware_id.into(),
            key,
        }
    }
}

impl SchemaModel for GatewayDevice {
    const SCHEMA_NAME: &'static str = "gateway_device.schema.json";
    const MODEL_NAME: &'static str = "gateway device";
}

impl ValidateModel for GatewayDevice {
    /// The challenge key is checked first. If it fails, its error is
    /// returned as is and the structural check does not run.
    fn validate_model(&self, schemas: &dyn StructuralValidator) -> Result<(), ModelError> {
        self.key.validate_model(schemas)?;
        self.check_schema(schemas)
    }
}

/// Management daemon settings pushed to a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MagmadGatewayConfigs {
    /// Whether the gateway upgrades itself.
    pub autoupgrade_enabled: bool,
    /// Seconds between upgrade polls.
    pub autoupgrade_poll_interval: i32,
    /// Seconds between check-ins with the control plane.
    pub checkin_interval: i32,
    /// Seconds before a check-in is abandoned.
    pub checkin_timeout: i32,
    /// Services started on demand rather than at boot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_services: Vec<String>,
    /// Named feature toggles.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub feature_flags: BTreeMap<String, bool>,
}

impl SchemaModel for MagmadGatewayConfigs {
    const SCHEMA_NAME: &'static str = "magmad_gateway_configs.schema.json";
    const MODEL_NAME: &'static str = "magmad gateway configs";
}

/// A registered gateway: identity, device and management settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagmadGateway {
    /// Logical gateway identifier.
    pub id: GatewayId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Physical device backing this gateway.
    pub device: GatewayDevice,
    /// Management daemon settings.
    pub magmad: MagmadGatewayConfigs,
    /// Upgrade tier.
    pub tier: TierId,
}

impl SchemaModel for MagmadGateway {
    const SCHEMA_NAME: &'static str = "magmad_gateway.schema.json";
    const MODEL_NAME: &'static str = "magmad gateway";
}

impl ValidateModel for MagmadGateway {
    /// The owned device is validated first, including its challenge key rule,
    /// so a gateway whose device key is invalid is rejected even when its
    /// structure alone is well formed.
    fn validate_model(&self, schemas: &dyn StructuralValidator) -> Result<(), ModelError> {
        self.device.validate_model(schemas)?;
        self.check_schema(schemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge_key::ChallengeKeyError;
    use crate::testing::{p256_key, RecordingValidator};

    fn configs() -> MagmadGatewayConfigs {
        MagmadGatewayConfigs {
            autoupgrade_enabled: true,
            autoupgrade_poll_interval: 300,
            checkin_interval: 60,
            checkin_timeout: 30,
            ..Default::default()
        }
    }

    fn gateway(device: GatewayDevice) -> MagmadGateway {
        MagmadGateway {
            id: GatewayId::from("gw1"),
            name: "gateway one".to_string(),
            description: String::new(),
            device,
            magmad: configs(),
            tier: TierId::from("default"),
        }
    }

    #[test]
    fn test_device_runs_key_then_schema() {
        let recorder = RecordingValidator::default();
        let device = GatewayDevice::new("hw-1", ChallengeKey::software_ecdsa_sha256(p256_key()));
        device.validate_model(&recorder).unwrap();
        assert_eq!(recorder.calls(), vec![GatewayDevice::SCHEMA_NAME.to_string()]);
    }

    #[test]
    fn test_device_key_failure_skips_schema() {
        let recorder = RecordingValidator::rejecting(GatewayDevice::SCHEMA_NAME);
        let device = GatewayDevice::new("hw-1", ChallengeKey::new("ECHO", Some(p256_key())));
        let err = device.validate_model(&recorder).unwrap_err();
        assert_eq!(
            err.as_challenge_key(),
            Some(&ChallengeKeyError::UnexpectedKeyPresent)
        );
        assert!(recorder.calls().is_empty(), "schema ran: {:?}", recorder.calls());
    }

    #[test]
    fn test_device_schema_failure_propagates() {
        let recorder = RecordingValidator::rejecting(GatewayDevice::SCHEMA_NAME);
        let device = GatewayDevice::new("hw-1", ChallengeKey::echo());
        let err = device.validate_model(&recorder).unwrap_err();
        assert!(err.as_schema().is_some(), "got: {err}");
    }

    #[test]
    fn test_gateway_validates_device_before_itself() {
        let recorder = RecordingValidator::default();
        gateway(GatewayDevice::new("hw-1", ChallengeKey::echo()))
            .validate_model(&recorder)
            .unwrap();
        assert_eq!(
            recorder.calls(),
            vec![
                GatewayDevice::SCHEMA_NAME.to_string(),
                MagmadGateway::SCHEMA_NAME.to_string(),
            ]
        );
    }

    #[test]
    fn test_gateway_stops_at_device_failure() {
        let recorder = RecordingValidator::rejecting(GatewayDevice::SCHEMA_NAME);
        let err = gateway(GatewayDevice::new("hw-1", ChallengeKey::echo()))
            .validate_model(&recorder)
            .unwrap_err();
        assert!(err.as_schema().is_some());
        assert_eq!(recorder.calls(), vec![GatewayDevice::SCHEMA_NAME.to_string()]);
    }

    #[test]
    fn test_gateway_stops_at_key_failure() {
        let recorder = RecordingValidator::default();
        let err = gateway(GatewayDevice::new("hw-1", ChallengeKey::new("SOFTWARE_ECDSA_SHA256", None)))
            .validate_model(&recorder)
            .unwrap_err();
        assert_eq!(err.to_string(), "No key supplied");
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_configs_wire_format_omits_empty_collections() {
        let json = serde_json::to_value(configs()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "autoupgrade_enabled": true,
                "autoupgrade_poll_interval": 300,
                "checkin_interval": 60,
                "checkin_timeout": 30
            })
        );
    }
}
