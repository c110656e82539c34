//! # Validate Subcommand
//!
//! Validates gateway documents of one model type. Each file is decoded into
//! its model and run through [`ValidateModel`]; files are independent, so a
//! failure in one does not stop the others.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use gwm_models::{
    ChallengeKey, GatewayDevice, MagmadGateway, MagmadGatewayConfigs, NetworkDnsConfig,
    NetworkDnsRecords, NetworkFeatures, ValidateModel,
};
use gwm_schema::StructuralValidator;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schemas::load_schemas;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Model type of every document.
    #[arg(long, short = 'm', value_enum)]
    pub model: ModelKind,

    /// Documents to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Load schemas from this directory instead of the builtin set.
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

/// Gateway model a document is decoded as.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    ChallengeKey,
    GatewayDevice,
    MagmadGateway,
    MagmadGatewayConfigs,
    NetworkDnsConfig,
    NetworkDnsRecords,
    NetworkFeatures,
}

impl ModelKind {
    /// Decode a document into this model.
    pub fn decode(self, document: Value) -> Result<Box<dyn ValidateModel>, serde_json::Error> {
        fn boxed<M: DeserializeOwned + ValidateModel + 'static>(
            document: Value,
        ) -> Result<Box<dyn ValidateModel>, serde_json::Error> {
            Ok(Box::new(serde_json::from_value::<M>(document)?))
        }

        match self {
            Self::ChallengeKey => boxed::<ChallengeKey>(document),
            Self::GatewayDevice => boxed::<GatewayDevice>(document),
            Self::MagmadGateway => boxed::<MagmadGateway>(document),
            Self::MagmadGatewayConfigs => boxed::<MagmadGatewayConfigs>(document),
            Self::NetworkDnsConfig => boxed::<NetworkDnsConfig>(document),
            Self::NetworkDnsRecords => boxed::<NetworkDnsRecords>(document),
            Self::NetworkFeatures => boxed::<NetworkFeatures>(document),
        }
    }
}

/// Result for one document.
#[derive(Debug)]
pub struct FileOutcome {
    /// Document path.
    pub path: PathBuf,
    /// `Err` holds the full, display-ready reason the document was rejected.
    pub result: Result<(), String>,
}

/// Results for a whole run, in argument order.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// One entry per file.
    pub outcomes: Vec<FileOutcome>,
}

impl ValidationReport {
    /// Number of accepted documents.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of rejected documents.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True when every document was accepted.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Load, decode and validate a single document.
pub fn validate_file(
    kind: ModelKind,
    path: &Path,
    schemas: &dyn StructuralValidator,
) -> anyhow::Result<()> {
    let document = gwm_schema::load_document(path)?;
    let model = kind
        .decode(document)
        .map_err(|e| anyhow::anyhow!("cannot decode as {kind:?}: {e}"))?;
    model.validate_model(schemas)?;
    Ok(())
}

/// Validate every file named in `args`.
///
/// # Errors
///
/// Only schema loading aborts the run. Per-file failures are recorded in the
/// report.
pub fn run(args: &ValidateArgs) -> anyhow::Result<ValidationReport> {
    let schemas = load_schemas(args.schema_dir.as_deref())?;
    let mut report = ValidationReport::default();

    for path in &args.files {
        let result = validate_file(args.model, path, &schemas).map_err(|e| format!("{e:#}"));
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), "document accepted"),
            Err(reason) => tracing::warn!(path = %path.display(), %reason, "document rejected"),
        }
        report.outcomes.push(FileOutcome {
            path: path.clone(),
            result,
        });
    }

    tracing::info!(
        model = ?args.model,
        passed = report.passed(),
        failed = report.failed(),
        "validation finished"
    );
    Ok(report)
}
