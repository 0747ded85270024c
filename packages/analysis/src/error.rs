//! Typed errors for the analysis pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input rejected before any remote call was made
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Text generation failed
    #[error("text generation failed: {0}")]
    Remote(#[from] RemoteError),

    /// Run was cancelled
    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// Build a validation error from a reason string.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Errors from the remote text-generation collaborator.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure (connection refused, DNS, TLS)
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered but refused or failed the request
    #[error("service error: {0}")]
    Service(String),

    /// No answer within the configured deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl RemoteError {
    /// Whether a single retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
