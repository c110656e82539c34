//! # Challenge Key Type — Discriminator
//!
//! Defines `ChallengeKeyType`, the discriminator of a gateway's challenge
//! key descriptor. The discriminator decides whether a key payload must be
//! present and how it is decoded.
//!
//! ## Security Invariant
//!
//! The wire value is a free-form string, but the in-memory type is closed:
//! any value outside the recognised set becomes `Unknown(value)`, which every
//! consumer must handle explicitly. There is no default variant that could
//! silently accept an unrecognised mechanism.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Authentication mechanism declared by a gateway device.
///
/// | Variant | Wire value | Key payload |
/// |---------|------------|-------------|
/// | `Echo` | `ECHO` | must be absent |
/// | `SoftwareEcdsaSha256` | `SOFTWARE_ECDSA_SHA256` | PKIX public key, required |
/// | `Unknown` | anything else | always rejected |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChallengeKeyType {
    /// Echo challenge; the gateway proves nothing beyond echoing a nonce.
    Echo,
    /// ECDSA over SHA-256 with a software-held key.
    SoftwareEcdsaSha256,
    /// Any wire value outside the recognised set.
    Unknown(String),
}

impl ChallengeKeyType {
    /// Wire value for [`ChallengeKeyType::Echo`].
    pub const ECHO: &'static str = "ECHO";
    /// Wire value for [`ChallengeKeyType::SoftwareEcdsaSha256`].
    pub const SOFTWARE_ECDSA_SHA256: &'static str = "SOFTWARE_ECDSA_SHA256";

    /// Recognised discriminators, in wire form.
    pub const KNOWN: [&'static str; 2] = [Self::ECHO, Self::SOFTWARE_ECDSA_SHA256];

    /// Return the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Echo => Self::ECHO,
            Self::SoftwareEcdsaSha256 => Self::SOFTWARE_ECDSA_SHA256,
            Self::Unknown(value) => value,
        }
    }

    /// Whether this discriminator is in the recognised set.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ChallengeKeyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::ECHO => Self::Echo,
            Self::SOFTWARE_ECDSA_SHA256 => Self::SoftwareEcdsaSha256,
            _ => Self::Unknown(value),
        }
    }
}

impl From<&str> for ChallengeKeyType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ChallengeKeyType> for String {
    fn from(value: ChallengeKeyType) -> Self {
        match value {
            ChallengeKeyType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ChallengeKeyType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for ChallengeKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
