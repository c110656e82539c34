//! # Error Types — Structured Error Hierarchy
//!
//! Errors shared across the workspace. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Key decoding errors carry the failing stage (DER structure, algorithm,
//!   key material) so that callers can surface the cause verbatim.

use thiserror::Error;

/// Failure to decode a PKIX `SubjectPublicKeyInfo` payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyDecodeError {
    /// The payload has zero length.
    #[error("empty key payload")]
    Empty,

    /// The payload is not a DER-encoded `SubjectPublicKeyInfo`.
    #[error("malformed SubjectPublicKeyInfo: {0}")]
    Der(String),

    /// The structure decoded, but bytes remain after it.
    #[error("trailing data after SubjectPublicKeyInfo ({0} bytes)")]
    TrailingData(usize),

    /// The algorithm identifier is not a recognised public key algorithm.
    #[error("unknown public key algorithm {0}")]
    UnsupportedAlgorithm(String),

    /// An EC key names a curve that is not supported.
    #[error("unsupported elliptic curve {0}")]
    UnsupportedCurve(String),

    /// The algorithm is known but the key material is invalid for it.
    #[error("invalid {algorithm} public key: {reason}")]
    InvalidKeyMaterial {
        /// Algorithm the key claimed to be.
        algorithm: &'static str,
        /// Reason the key material was rejected.
        reason: String,
    },
}
