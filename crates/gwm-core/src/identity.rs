//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers carried by gateway models. These
//! prevent accidental identifier confusion: you cannot pass a `HardwareId`
//! where a `GatewayId` is expected.
//!
//! Identifiers are not validated at construction. Their shape (non-empty,
//! allowed characters) is a structural concern enforced by the schema layer,
//! so that a malformed identifier is reported alongside every other
//! structural violation of the same document.

use serde::{Deserialize, Serialize};

/// Logical identifier of a gateway within a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayId(String);

/// Hardware identifier reported by a gateway device (typically a UUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HardwareId(String);

/// Identifier of the upgrade tier a gateway belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(String);

macro_rules! string_newtype {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Wrap a raw identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Access the raw identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

string_newtype!(GatewayId, "gateway");
string_newtype!(HardwareId, "hw");
string_newtype!(TierId, "tier");
