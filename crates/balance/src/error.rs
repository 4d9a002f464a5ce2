//! Error types for balance fetching.

use thiserror::Error;

/// Errors that can occur when fetching the account balance.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Graph API returned a non-success status
    #[error("Graph API returned {status}: {body}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body, useful for operator diagnosis
        body: String,
    },

    /// Response body could not be decoded
    #[error("failed to decode Graph API response: {0}")]
    Decode(#[from] serde_json::Error),
}
