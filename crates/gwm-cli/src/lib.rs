//! # gwm-cli — Gateway Model Validation CLI
//!
//! ## Subcommands
//!
//! - `validate`: check gateway documents (`.json`, `.yaml`, `.yml`)
//! - `schemas`: list the schemas a validation run would use
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `gwm-models` and `gwm-schema`; no validation
//!   rules live here.

pub mod schemas;
pub mod validate;
