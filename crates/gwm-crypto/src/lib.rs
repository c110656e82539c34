//! # gwm-crypto — Public Key Decoding
//!
//! Decodes the key payloads carried by gateway challenge keys:
//!
//! - **PKIX** `SubjectPublicKeyInfo` parsing (DER) for RSA, DSA, EC,
//!   Ed25519 and X25519 keys.
//! - **Key material checks** for every accepted algorithm: EC points must lie
//!   on their NIST curve, Ed25519 points must decompress, and DSA domain
//!   parameters must be positive integers. A structurally valid envelope
//!   around bad key material is still rejected.
//! - **SHA-256 fingerprints** of the DER payload, safe to log.
//!
//! ## Crate Policy
//!
//! - Depends only on `gwm-core` internally.
//! - Decoding is pure: no I/O and no global state.
//! - Raw key bytes are never logged; fingerprints are.

pub mod fingerprint;
pub mod pkix;

pub use fingerprint::KeyFingerprint;
pub use pkix::{parse_pkix_public_key, EcCurve, KeyAlgorithm, PublicKeyInfo};
