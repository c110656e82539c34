//! # SHA-256 Key Fingerprints
//!
//! A fingerprint is the SHA-256 digest of the DER-encoded
//! `SubjectPublicKeyInfo`, rendered as lowercase hex. It identifies a key in
//! logs without exposing the key material itself.

use sha2::{Digest, Sha256};

/// SHA-256 digest of a DER-encoded public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyFingerprint([u8; 32]);

impl KeyFingerprint {
    /// Compute the fingerprint of a DER payload.
    pub fn of_der(der: &[u8]) -> Self {
        let hash = Sha256::digest(der);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Return the raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Debug for KeyFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyFingerprint({})", self.to_hex())
    }
}

impl std::fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SHA256:{}", self.to_hex())
    }
}
