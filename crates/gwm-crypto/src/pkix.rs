//! # PKIX Public Key Decoding
//!
//! Parses DER-encoded `SubjectPublicKeyInfo` structures (RFC 5280 §4.1.2.7)
//! as presented by gateways registering a software-held signing key.
//!
//! ## Accepted Algorithms
//!
//! | Algorithm OID | Kind | Additional check |
//! |---------------|------|------------------|
//! | `1.2.840.113549.1.1.1` | RSA | modulus and exponent decode |
//! | `1.2.840.10040.4.1` | DSA | parameters `p`, `q`, `g` and public value `y` are positive INTEGERs |
//! | `1.2.840.10045.2.1` | EC | named NIST curve, uncompressed point on that curve |
//! | `1.3.101.112` | Ed25519 | no parameters, 32-byte point that decompresses |
//! | `1.3.101.110` | X25519 | no parameters, 32-byte key |
//!
//! ## Security Invariant
//!
//! The whole payload must be consumed by the structure. Trailing bytes are
//! rejected so that two different payloads never decode to the same key.

use gwm_core::KeyDecodeError;
use x509_parser::der_parser::asn1_rs::{Any, Tag};
use x509_parser::der_parser::ber::BerObjectContent;
use x509_parser::der_parser::der::parse_der_integer;
use x509_parser::prelude::FromDer;
use x509_parser::public_key::PublicKey;
use x509_parser::x509::SubjectPublicKeyInfo;

use crate::fingerprint::KeyFingerprint;

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_DSA: &str = "1.2.840.10040.4.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";
const OID_X25519: &str = "1.3.101.110";

const OID_CURVE_P224: &str = "1.3.132.0.33";
const OID_CURVE_P256: &str = "1.2.840.10045.3.1.7";
const OID_CURVE_P384: &str = "1.3.132.0.34";
const OID_CURVE_P521: &str = "1.3.132.0.35";

/// NIST curves accepted for EC public keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-224 (secp224r1).
    P224,
    /// NIST P-256 (prime256v1).
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// NIST P-521 (secp521r1).
    P521,
}

impl EcCurve {
    fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            OID_CURVE_P224 => Some(Self::P224),
            OID_CURVE_P256 => Some(Self::P256),
            OID_CURVE_P384 => Some(Self::P384),
            OID_CURVE_P521 => Some(Self::P521),
            _ => None,
        }
    }

    /// Conventional curve name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::P224 => "P-224",
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Byte length of one field element.
    pub fn field_bytes(&self) -> usize {
        match self {
            Self::P224 => 28,
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }
}

/// Public key algorithm recovered from a `SubjectPublicKeyInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA with the given modulus size in bits.
    Rsa {
        /// Modulus size in bits.
        bits: usize,
    },
    /// DSA.
    Dsa,
    /// ECDSA over a named NIST curve.
    Ecdsa(EcCurve),
    /// Ed25519.
    Ed25519,
    /// X25519.
    X25519,
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rsa { bits } => write!(f, "RSA-{bits}"),
            Self::Dsa => f.write_str("DSA"),
            Self::Ecdsa(curve) => write!(f, "ECDSA-{}", curve.name()),
            Self::Ed25519 => f.write_str("Ed25519"),
            Self::X25519 => f.write_str("X25519"),
        }
    }
}

/// A successfully decoded public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInfo {
    algorithm: KeyAlgorithm,
    fingerprint: KeyFingerprint,
}

impl PublicKeyInfo {
    /// Algorithm of the decoded key.
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// SHA-256 fingerprint of the DER payload.
    pub fn fingerprint(&self) -> &KeyFingerprint {
        &self.fingerprint
    }
}

/// Decode a DER-encoded PKIX `SubjectPublicKeyInfo`.
///
/// # Errors
///
/// - [`KeyDecodeError::Empty`] for a zero-length payload.
/// - [`KeyDecodeError::Der`] if the bytes are not a `SubjectPublicKeyInfo`.
/// - [`KeyDecodeError::TrailingData`] if bytes follow the structure.
/// - [`KeyDecodeError::UnsupportedAlgorithm`] / [`KeyDecodeError::UnsupportedCurve`]
///   for algorithms outside the accepted table.
/// - [`KeyDecodeError::InvalidKeyMaterial`] if the key bits do not form a
///   valid key for the declared algorithm.
pub fn parse_pkix_public_key(der: &[u8]) -> Result<PublicKeyInfo, KeyDecodeError> {
    if der.is_empty() {
        return Err(KeyDecodeError::Empty);
    }

    let (rest, spki) =
        SubjectPublicKeyInfo::from_der(der).map_err(|e| KeyDecodeError::Der(e.to_string()))?;
    if !rest.is_empty() {
        return Err(KeyDecodeError::TrailingData(rest.len()));
    }

    let algorithm_oid = spki.algorithm.algorithm.to_id_string();
    let key_bits: &[u8] = &spki.subject_public_key.data;

    let algorithm = match algorithm_oid.as_str() {
        OID_RSA_ENCRYPTION => match spki.parsed() {
            Ok(PublicKey::RSA(rsa)) => KeyAlgorithm::Rsa {
                bits: rsa.key_size(),
            },
            Ok(_) => return Err(invalid("RSA", "not an RSAPublicKey structure")),
            Err(e) => return Err(invalid("RSA", e)),
        },
        OID_DSA => {
            check_dsa(spki.algorithm.parameters.as_ref(), key_bits)?;
            KeyAlgorithm::Dsa
        }
        OID_EC_PUBLIC_KEY => {
            let curve_oid = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|params| params.as_oid().ok())
                .map(|oid| oid.to_id_string())
                .ok_or_else(|| invalid("EC", "missing named curve parameter"))?;
            let curve = EcCurve::from_oid(&curve_oid)
                .ok_or(KeyDecodeError::UnsupportedCurve(curve_oid))?;
            check_ec_point(curve, key_bits)?;
            KeyAlgorithm::Ecdsa(curve)
        }
        OID_ED25519 => {
            reject_parameters("Ed25519", spki.algorithm.parameters.as_ref())?;
            let point: [u8; 32] = key_bits
                .try_into()
                .map_err(|_| invalid("Ed25519", format!("expected 32 bytes, got {}", key_bits.len())))?;
            ed25519_dalek::VerifyingKey::from_bytes(&point).map_err(|e| invalid("Ed25519", e))?;
            KeyAlgorithm::Ed25519
        }
        OID_X25519 => {
            reject_parameters("X25519", spki.algorithm.parameters.as_ref())?;
            if key_bits.len() != 32 {
                return Err(invalid(
                    "X25519",
                    format!("expected 32 bytes, got {}", key_bits.len()),
                ));
            }
            KeyAlgorithm::X25519
        }
        _ => return Err(KeyDecodeError::UnsupportedAlgorithm(algorithm_oid)),
    };

    let info = PublicKeyInfo {
        algorithm,
        fingerprint: KeyFingerprint::of_der(der),
    };
    tracing::debug!(
        algorithm = %info.algorithm,
        fingerprint = %info.fingerprint,
        "decoded PKIX public key"
    );
    Ok(info)
}

/// EC points must be uncompressed (`0x04 || X || Y`) and lie on the curve.
fn check_ec_point(curve: EcCurve, point: &[u8]) -> Result<(), KeyDecodeError> {
    let expected = 1 + 2 * curve.field_bytes();
    if point.len() != expected || point.first() != Some(&0x04) {
        return Err(invalid(
            curve.name(),
            format!("expected {expected}-byte uncompressed point"),
        ));
    }
    let on_curve = match curve {
        EcCurve::P224 => p224::PublicKey::from_sec1_bytes(point).map(drop),
        EcCurve::P256 => p256::PublicKey::from_sec1_bytes(point).map(drop),
        EcCurve::P384 => p384::PublicKey::from_sec1_bytes(point).map(drop),
        EcCurve::P521 => p521::PublicKey::from_sec1_bytes(point).map(drop),
    };
    on_curve.map_err(|_| invalid(curve.name(), "point is not on the curve"))
}

/// DSA keys carry `Dss-Parms ::= SEQUENCE { p, q, g }` as algorithm
/// parameters and the public value `y` as an INTEGER in the key bits.
fn check_dsa(params: Option<&Any<'_>>, key_bits: &[u8]) -> Result<(), KeyDecodeError> {
    let params = params
        .filter(|p| p.tag() == Tag::Sequence)
        .ok_or_else(|| invalid("DSA", "parameters are not a SEQUENCE"))?;
    let mut rest = params.data;
    for name in ["p", "q", "g"] {
        rest = positive_integer(rest, name)?;
    }
    positive_integer(key_bits, "y")?;
    Ok(())
}

/// Parse one DER INTEGER that must be greater than zero; returns the input
/// that follows it.
fn positive_integer<'a>(input: &'a [u8], name: &str) -> Result<&'a [u8], KeyDecodeError> {
    let (rest, obj) =
        parse_der_integer(input).map_err(|e| invalid("DSA", format!("{name}: {e}")))?;
    match obj.content {
        BerObjectContent::Integer(bytes)
            if bytes.first().is_some_and(|b| b & 0x80 == 0) && bytes.iter().any(|&b| b != 0) =>
        {
            Ok(rest)
        }
        _ => Err(invalid("DSA", format!("{name} is not a positive integer"))),
    }
}

/// Curve25519 keys are identified by OID alone.
fn reject_parameters(
    algorithm: &'static str,
    params: Option<&Any<'_>>,
) -> Result<(), KeyDecodeError> {
    match params {
        Some(_) => Err(invalid(algorithm, "unexpected algorithm parameters")),
        None => Ok(()),
    }
}

fn invalid(algorithm: &'static str, reason: impl std::fmt::Display) -> KeyDecodeError {
    KeyDecodeError::InvalidKeyMaterial {
        algorithm,
        reason: reason.to_string(),
    }
}
