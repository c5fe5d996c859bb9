//! Error types for the reasoning service

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReasoningError {
    /// The current model has no quota left; the only error that triggers rotation
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Response failed validation: {0}")]
    ValidationError(String),

    #[error("Invalid reasoning configuration: {0}")]
    Configuration(String),
}

impl ReasoningError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, ReasoningError::QuotaExceeded(_))
    }
}
