//! Error types for the alert engine.

use thiserror::Error;

/// Errors that can occur while evaluating or persisting alert state.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Threshold configuration is unusable
    #[error("threshold must be a positive number, got {0}")]
    InvalidThreshold(f64),

    /// State file could not be written
    #[error("failed to persist notification state: {0}")]
    Persist(#[from] std::io::Error),

    /// State could not be encoded as JSON
    #[error("failed to encode notification state: {0}")]
    Encode(#[from] serde_json::Error),
}
