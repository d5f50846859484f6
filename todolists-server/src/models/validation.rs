//! Validation error types

use thiserror::Error;

/// Request payload validation failure (always answered with 400)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field absent or null
    #[error("{field}: Missing required parameter in the JSON body")]
    MissingField { field: &'static str },

    /// Field present but of the wrong type or unparseable
    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Body could not be read as a JSON object
    #[error("Malformed JSON body: {reason}")]
    MalformedBody { reason: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
