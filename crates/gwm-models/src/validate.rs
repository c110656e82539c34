//! # The `ValidateModel` Capability
//!
//! Every gateway model implements [`ValidateModel`], so callers never need to
//! know which models carry extra semantic rules. Models described by a schema
//! also implement [`SchemaModel`], which supplies the structural half of the
//! check.

use gwm_schema::StructuralValidator;
use serde::Serialize;

use crate::error::ModelError;
use crate::gateway::MagmadGatewayConfigs;
use crate::network::{NetworkDnsConfig, NetworkDnsRecords, NetworkFeatures};

/// Validate a model before it is accepted.
///
/// Implementations are pure: the same model and validator always produce the
/// same result, and the model is never modified.
pub trait ValidateModel {
    /// Run every rule for this model, stopping at the first failure.
    fn validate_model(&self, schemas: &dyn StructuralValidator) -> Result<(), ModelError>;
}

/// A model whose structure is described by a named schema.
pub trait SchemaModel: Serialize {
    /// Schema filename, e.g. `"gateway_device.schema.json"`.
    const SCHEMA_NAME: &'static str;
    /// Model name used in diagnostics.
    const MODEL_NAME: &'static str;

    /// Run the structural check for this model alone.
    fn check_schema(&self, schemas: &dyn StructuralValidator) -> Result<(), ModelError> {
        let instance = serde_json::to_value(self).map_err(|source| ModelError::Encode {
            model: Self::MODEL_NAME,
            source,
        })?;
        schemas.validate_structure(Self::SCHEMA_NAME, &instance)?;
        Ok(())
    }
}

/// Models with no semantic rule: validation is exactly the structural check.
macro_rules! delegate_to_schema {
    ($($model:ty),+ $(,)?) => {
        $(
            impl ValidateModel for $model {
                fn validate_model(
                    &self,
                    schemas: &dyn StructuralValidator,
                ) -> Result<(), ModelError> {
                    self.check_schema(schemas)
                }
            }
        )+
    };
}

delegate_to_schema!(
    MagmadGatewayConfigs,
    NetworkDnsConfig,
    NetworkDnsRecords,
    NetworkFeatures,
);
