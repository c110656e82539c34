//! # Schemas Subcommand
//!
//! Lists the schemas that `validate` would load.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use gwm_schema::SchemaValidator;

/// Arguments for the schemas subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Load schemas from this directory instead of the builtin set.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

/// Build the schema registry, from `schema_dir` if given.
pub fn load_schemas(schema_dir: Option<&Path>) -> anyhow::Result<SchemaValidator> {
    match schema_dir {
        Some(dir) => SchemaValidator::from_dir(dir)
            .with_context(|| format!("loading schemas from {}", dir.display())),
        None => SchemaValidator::builtin().context("loading builtin schemas"),
    }
}

/// Names of every loaded schema, sorted.
pub fn run(args: &SchemasArgs) -> anyhow::Result<Vec<String>> {
    let schemas = load_schemas(args.schema_dir.as_deref())?;
    tracing::info!(source = %schemas.source(), count = schemas.schema_count(), "loaded schemas");
    Ok(schemas.schema_names().into_iter().map(str::to_string).collect())
}
