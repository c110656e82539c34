//! # Challenge Key — Discriminated Key Descriptor
//!
//! A gateway declares how it will answer authentication challenges with a
//! `ChallengeKey`: a `key_type` discriminator and an optional `key` payload.
//! Which payloads are acceptable depends on the discriminator's value, so
//! the rule lives here rather than in a schema.
//!
//! ## Rule
//!
//! | `key_type` | `key` | Result |
//! |------------|-------|--------|
//! | `ECHO` | absent | ok |
//! | `ECHO` | present (including zero-length) | `UnexpectedKeyPresent` |
//! | `SOFTWARE_ECDSA_SHA256` | absent | `MissingKey` |
//! | `SOFTWARE_ECDSA_SHA256` | PKIX public key | ok |
//! | `SOFTWARE_ECDSA_SHA256` | anything else | `MalformedKey` |
//! | anything else | any | `UnknownKeyType` |

use gwm_core::{ChallengeKeyType, KeyBytes, KeyDecodeError};
use gwm_crypto::{parse_pkix_public_key, PublicKeyInfo};
use gwm_schema::StructuralValidator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ModelError;
use crate::validate::ValidateModel;

/// A gateway's declared authentication mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeKey {
    /// Discriminator.
    pub key_type: ChallengeKeyType,
    /// Key payload, base64 on the wire. `None` when the field is missing or
    /// `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyBytes>,
}

/// Why a challenge key was rejected. Never retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeKeyError {
    /// The discriminator forbids a payload but one was supplied.
    #[error("ECHO mode should not have key value")]
    UnexpectedKeyPresent,

    /// The discriminator requires a payload but none was supplied.
    #[error("No key supplied")]
    MissingKey,

    /// The payload did not decode as a PKIX public key.
    #[error("Failed to parse key: {0}")]
    MalformedKey(#[source] KeyDecodeError),

    /// The discriminator is outside the recognised set.
    #[error("Unknown key type {0}")]
    UnknownKeyType(String),
}

impl ChallengeKey {
    /// Build a descriptor from its parts.
    pub fn new(key_type: impl Into<ChallengeKeyType>, key: Option<KeyBytes>) -> Self {
        Self {
            key_type: key_type.into(),
            key,
        }
    }

    /// An `ECHO` descriptor with no payload.
    pub fn echo() -> Self {
        Self::new(ChallengeKeyType::Echo, None)
    }

    /// A `SOFTWARE_ECDSA_SHA256` descriptor carrying a DER public key.
    pub fn software_ecdsa_sha256(der: impl Into<KeyBytes>) -> Self {
        Self::new(ChallengeKeyType::SoftwareEcdsaSha256, Some(der.into()))
    }

    /// Check the descriptor and return the decoded public key, if the
    /// discriminator calls for one.
    ///
    /// # Errors
    ///
    /// Returns the [`ChallengeKeyError`] named in the module-level table.
    pub fn public_key(&self) -> Result<Option<PublicKeyInfo>, ChallengeKeyError> {
        match &self.key_type {
            ChallengeKeyType::Echo => match self.key {
                Some(_) => Err(ChallengeKeyError::UnexpectedKeyPresent),
                None => Ok(None),
            },
            ChallengeKeyType::SoftwareEcdsaSha256 => {
                let key = self.key.as_ref().ok_or(ChallengeKeyError::MissingKey)?;
                parse_pkix_public_key(key.as_bytes())
                    .map(Some)
                    .map_err(ChallengeKeyError::MalformedKey)
            }
            ChallengeKeyType::Unknown(value) => {
                Err(ChallengeKeyError::UnknownKeyType(value.clone()))
            }
        }
    }

    /// Check the descriptor.
    pub fn validate(&self) -> Result<(), ChallengeKeyError> {
        self.public_key().map(|_| ())
    }
}

impl ValidateModel for ChallengeKey {
    /// The semantic rule is the whole check; the structural validator is
    /// not consulted.
    fn validate_model(&self, _schemas: &dyn StructuralValidator) -> Result<(), ModelError> {
        self.validate().map_err(|e| {
            tracing::warn!(key_type = %self.key_type, error = %e, "rejected challenge key");
            ModelError::from(e)
        })
    }
}
