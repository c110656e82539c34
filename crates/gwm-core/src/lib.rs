//! # gwm-core — Foundational Types for Gateway Model Validation
//!
//! Every other crate in the workspace depends on `gwm-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed discriminator.** `ChallengeKeyType` is a single enum with an
//!    explicit `Unknown` variant. Every `match` on it is exhaustive, so an
//!    unrecognised wire value can never fall through to a passing branch.
//!
//! 2. **Newtype wrappers for identifiers.** `GatewayId`, `HardwareId` and
//!    `TierId` are distinct types. No bare strings for identifiers.
//!
//! 3. **`KeyBytes` payloads.** Key material travels as standard base64 on the
//!    wire and as raw bytes in memory. Presence is modelled with `Option`,
//!    so a zero-length payload is still a present payload.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gwm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod encoding;
pub mod error;
pub mod identity;
pub mod key_type;

pub use encoding::KeyBytes;
pub use error::KeyDecodeError;
pub use identity::{GatewayId, HardwareId, TierId};
pub use key_type::ChallengeKeyType;
