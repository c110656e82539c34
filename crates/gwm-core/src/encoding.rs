//! # Key Payload Encoding
//!
//! `KeyBytes` holds a key payload as raw bytes and serializes it as a
//! standard (RFC 4648, padded) base64 string, the encoding gateways use
//! when registering.
//!
//! A zero-length payload deserializes to an empty `KeyBytes`, not to an
//! absent key. Absence is expressed by the surrounding `Option`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw key payload, base64 on the wire.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    /// Wrap raw payload bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a standard base64 string.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(encoded.trim()).map(Self)
    }

    /// Render as a standard base64 string.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Access the raw payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the raw payload.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for KeyBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for KeyBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for KeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for KeyBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for KeyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded)
            .map_err(|e| serde::de::Error::custom(format!("key is not valid base64: {e}")))
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "KeyBytes({} bytes, {prefix}...)", self.0.len())
    }
}
