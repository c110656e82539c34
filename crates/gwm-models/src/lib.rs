//! # gwm-models — Gateway Models and Their Validation
//!
//! Defines the objects exchanged between the control plane and gateways,
//! and the [`ValidateModel`] capability every one of them exposes.
//!
//! ## Validation Layers
//!
//! 1. **Semantic rules** that a schema cannot express. The only one is the
//!    [`ChallengeKey`] rule: whether `key` must be present, and how it must
//!    decode, depends on the value of `key_type`.
//! 2. **Structural rules** delegated to a [`StructuralValidator`]
//!    (field presence, types, formats, ranges).
//!
//! Composite models validate the models they own first, in a fixed order,
//! and stop at the first error. Leaf models delegate straight to the
//! structural check.
//!
//! | Model | Owns | Validation |
//! |-------|------|------------|
//! | `ChallengeKey` | none | semantic rule only |
//! | `GatewayDevice` | `ChallengeKey` | key, then schema |
//! | `MagmadGateway` | `GatewayDevice` | device, then schema |
//! | `MagmadGatewayConfigs` | none | schema |
//! | `NetworkDnsConfig` | none | schema |
//! | `NetworkDnsRecords` | none | schema |
//! | `NetworkFeatures` | none | schema |
//!
//! ## Crate Policy
//!
//! - Validation never mutates the model and performs no I/O.
//! - Errors propagate unchanged; nothing is aggregated across siblings.

pub mod challenge_key;
pub mod error;
pub mod gateway;
pub mod network;
pub mod validate;

pub use challenge_key::{ChallengeKey, ChallengeKeyError};
pub use error::ModelError;
pub use gateway::{GatewayDevice, MagmadGateway, MagmadGatewayConfigs};
pub use gwm_schema::StructuralValidator;
pub use network::{DnsConfigRecord, NetworkDnsConfig, NetworkDnsRecords, NetworkFeatures};
pub use validate::{SchemaModel, ValidateModel};

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use gwm_core::KeyBytes;
    use gwm_schema::{
        SchemaValidationError, StructuralValidator, ValidationViolations, Violation,
    };
    use p256::pkcs8::EncodePublicKey as _;
    use serde_json::Value;

    /// Structural validator that records every schema it is asked about.
    #[derive(Default)]
    pub struct RecordingValidator {
        pub calls: RefCell<Vec<String>>,
        pub reject: Option<&'static str>,
    }

    impl RecordingValidator {
        pub fn rejecting(schema_name: &'static str) -> Self {
            Self {
                calls: RefCell::default(),
                reject: Some(schema_name),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl StructuralValidator for RecordingValidator {
        fn validate_structure(
            &self,
            schema_name: &str,
            _instance: &Value,
        ) -> Result<(), SchemaValidationError> {
            self.calls.borrow_mut().push(schema_name.to_string());
            if self.reject == Some(schema_name) {
                return Err(SchemaValidationError::ValidationFailed {
                    schema_name: schema_name.to_string(),
                    violations: ValidationViolations::new(vec![Violation {
                        instance_path: String::new(),
                        schema_path: "/required".to_string(),
                        message: "rejected by test validator".to_string(),
                    }]),
                });
            }
            Ok(())
        }
    }

    /// A freshly generated P-256 public key in PKIX DER form.
    pub fn p256_key() -> KeyBytes {
        let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
        KeyBytes::new(secret.public_key().to_public_key_der().unwrap().as_bytes())
    }
}
