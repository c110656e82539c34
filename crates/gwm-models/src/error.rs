//! Top-level error returned by [`ValidateModel`](crate::ValidateModel).

use gwm_schema::SchemaValidationError;
use thiserror::Error;

use crate::challenge_key::ChallengeKeyError;

/// Why a model was rejected.
///
/// Challenge key and schema errors display exactly as their inner error, so
/// callers can surface them verbatim.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The owned challenge key broke its semantic rule.
    #[error(transparent)]
    ChallengeKey(#[from] ChallengeKeyError),

    /// The structural check rejected the model.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The model could not be converted to JSON for the structural check.
    #[error("cannot encode {model} for structural validation: {source}")]
    Encode {
        /// Model being validated.
        model: &'static str,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    /// The challenge key error, if that is what this is.
    pub fn as_challenge_key(&self) -> Option<&ChallengeKeyError> {
        match self {
            Self::ChallengeKey(e) => Some(e),
            _ => None,
        }
    }

    /// The structural error, if that is what this is.
    pub fn as_schema(&self) -> Option<&SchemaValidationError> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}
