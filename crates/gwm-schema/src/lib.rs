//! # gwm-schema — Structural Validation
//!
//! Provides the generic structural check that every gateway model delegates
//! to: field presence, types, formats and ranges, expressed as JSON Schema
//! (Draft 2020-12).
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] compiles the embedded schemas (or a directory of
//! `*.schema.json` files) once, resolves cross-schema `$ref`s locally, and
//! validates JSON values against them. It implements
//! [`StructuralValidator`], the seam the semantic layer in `gwm-models`
//! calls through.
//!
//! ## Crate Policy
//!
//! - No cross-field semantics here. Rules whose shape depends on the value
//!   of a sibling field belong to the model layer.
//! - Schema `$id` URIs must match the schema filename.
//! - Invalid documents are rejected with every violation, not just the first.

mod builtin;
pub mod validate;

pub use builtin::BUILTIN_SCHEMAS;
pub use validate::{
    load_document, SchemaSource, SchemaValidationError, SchemaValidator, StructuralValidator,
    ValidationViolations, Violation, SCHEMA_URI_PREFIX,
};
