//! Error types for the OpenSearch SDK.
//!
//! Every operation returns [`Result`]. Nothing is retried: a transport or
//! status failure surfaces to the caller as soon as it happens.

use thiserror::Error;

/// Result type for OpenSearch operations.
pub type Result<T> = std::result::Result<T, OpenSearchError>;

/// Errors that can occur when using the OpenSearch SDK.
#[derive(Error, Debug)]
pub enum OpenSearchError {
    /// Missing or unusable client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport error (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something other than 200 OK.
    #[error("Unexpected status {status_code}: {body}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// Response body was not valid JSON, or a payload failed to serialize.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller passed arguments the SDK cannot turn into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl OpenSearchError {
    /// Returns true if the service rejected the credentials or signature.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            OpenSearchError::Status { status_code: 401, .. }
                | OpenSearchError::Status { status_code: 403, .. }
        )
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenSearchError::Status { status_code, .. } => Some(*status_code),
            OpenSearchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
