//! # Schema Validation
//!
//! Structural validation of gateway model documents against JSON Schema
//! definitions (Draft 2020-12).
//!
//! ## Security Invariant
//!
//! Schema validation is a trust boundary. Documents that fail validation
//! are rejected with every violation reported: the instance path, the
//! schema path, and a human-readable message.
//!
//! ## Schema Resolution
//!
//! All schemas use `$id` URIs of the form
//! `https://schemas.gwm.dev/models/<filename>`. Cross-schema `$ref`s use the
//! same pattern and are resolved from the loaded set by filename. No `$ref`
//! ever triggers a network request; an unresolvable URI fails the build of
//! the referencing validator.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::builtin::BUILTIN_SCHEMAS;

/// URI prefix shared by every schema `$id`.
pub const SCHEMA_URI_PREFIX: &str = "https://schemas.gwm.dev/models/";

/// Meta-schemas are bundled with `jsonschema`; anything under this prefix
/// that still reaches the retriever is answered with an empty schema.
const META_SCHEMA_PREFIX: &str = "https://json-schema.org/";

/// Resolves cross-schema `$ref` URIs from the in-memory schema set.
struct LocalSchemaRetriever {
    /// Map from filename to schema value.
    schemas_by_name: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if uri_str.starts_with(META_SCHEMA_PREFIX) {
            return Ok(serde_json::json!({}));
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        self.schemas_by_name
            .get(filename)
            .cloned()
            .ok_or_else(|| format!("unresolvable schema reference '{uri_str}'").into())
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// No schema with this name is loaded.
    #[error("unknown schema '{schema_name}'")]
    UnknownSchema {
        /// Requested schema filename.
        schema_name: String,
    },

    /// A schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// A schema loaded but could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// IO error reading schemas.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "  {location}: {}", self.message)
    }
}

/// Non-empty collection of violations for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    /// Wrap a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All violations, in the order the validator reported them.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Consume and return the inner list.
    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// The generic structural check every gateway model delegates to.
///
/// Implementations decide field presence, types, formats and ranges for a
/// named schema. They know nothing about cross-field semantics.
pub trait StructuralValidator {
    /// Validate `instance` against the schema registered as `schema_name`.
    fn validate_structure(
        &self,
        schema_name: &str,
        instance: &Value,
    ) -> Result<(), SchemaValidationError>;
}

/// Where a [`SchemaValidator`]'s schemas came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Schemas compiled into this crate.
    Builtin,
    /// Schemas read from a directory at construction time.
    Directory(PathBuf),
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Every schema is compiled once at construction, with the full schema set
/// available for `$ref` resolution. Compiled validators are `Send + Sync`,
/// so a single `SchemaValidator` can be shared across threads by reference.
pub struct SchemaValidator {
    source: SchemaSource,
    validators: BTreeMap<String, Validator>,
}

impl SchemaValidator {
    /// Build a validator from the schemas embedded in this crate.
    ///
    /// # Errors
    ///
    /// Fails only if an embedded schema is invalid, which the crate's own
    /// tests rule out.
    pub fn builtin() -> Result<Self, SchemaValidationError> {
        let mut schemas = HashMap::new();
        for (name, content) in BUILTIN_SCHEMAS {
            schemas.insert(name.to_string(), parse_schema(name, content)?);
        }
        Self::compile(SchemaSource::Builtin, schemas)
    }

    /// Build a validator from every `*.schema.json` file in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoadError` if the directory or a schema file cannot be
    /// read or parsed, and `ValidatorBuildError` if a schema does not compile.
    pub fn from_dir(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_dir.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            }
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.ends_with(".schema.json") {
                let content = std::fs::read_to_string(&path)?;
                schemas.insert(name.to_string(), parse_schema(name, &content)?);
            }
        }

        Self::compile(SchemaSource::Directory(schema_dir), schemas)
    }

    fn compile(
        source: SchemaSource,
        schemas: HashMap<String, Value>,
    ) -> Result<Self, SchemaValidationError> {
        let mut validators = BTreeMap::new();
        for (name, schema) in &schemas {
            let mut opts = jsonschema::options();
            opts.with_draft(jsonschema::Draft::Draft202012)
                .should_validate_formats(true)
                .with_retriever(LocalSchemaRetriever {
                    schemas_by_name: schemas.clone(),
                });
            let validator =
                opts.build(schema)
                    .map_err(|e| SchemaValidationError::ValidatorBuildError {
                        schema_name: name.clone(),
                        reason: e.to_string(),
                    })?;
            validators.insert(name.clone(), validator);
        }
        tracing::debug!(%source, count = validators.len(), "compiled schema validators");
        Ok(Self { source, validators })
    }

    /// Where the schemas were loaded from.
    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Number of compiled schemas.
    pub fn schema_count(&self) -> usize {
        self.validators.len()
    }

    /// Names of all compiled schemas, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        self.validators.keys().map(String::as_str).collect()
    }

    /// Validate a parsed JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSchema` if no such schema is loaded, and
    /// `ValidationFailed` with every violation if the document is invalid.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let validator = self.validators.get(schema_name).ok_or_else(|| {
            SchemaValidationError::UnknownSchema {
                schema_name: schema_name.to_string(),
            }
        })?;

        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                schema = schema_name,
                violations = violations.len(),
                "document failed structural validation"
            );
            Err(SchemaValidationError::ValidationFailed {
                schema_name: schema_name.to_string(),
                violations: ValidationViolations(violations),
            })
        }
    }

    /// Load a document from disk and validate it against a named schema.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_name: &str,
    ) -> Result<(), SchemaValidationError> {
        let document = load_document(document_path)?;
        self.validate_document(&document, schema_name)
    }
}

impl StructuralValidator for SchemaValidator {
    fn validate_structure(
        &self,
        schema_name: &str,
        instance: &Value,
    ) -> Result<(), SchemaValidationError> {
        self.validate_document(instance, schema_name)
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("source", &self.source)
            .field("schemas", &self.schema_names())
            .finish()
    }
}

/// Read a JSON or YAML document into a JSON value.
///
/// `.yaml` and `.yml` files are parsed as YAML; everything else as JSON.
///
/// # Errors
///
/// Returns `DocumentLoadError` if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

fn parse_schema(name: &str, content: &str) -> Result<Value, SchemaValidationError> {
    serde_json::from_str(content).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name: name.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
