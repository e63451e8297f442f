//! Error types for the media server client.

use cadence_core::CadenceError;
use thiserror::Error;

/// Errors that can occur when talking to the media server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No access token or user, or the server rejected the token
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for CadenceError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::Request(_) | ServerClientError::ServerUnreachable(_) => {
                CadenceError::Network(err.to_string())
            }
            ServerClientError::InvalidUrl(_) => CadenceError::InvalidInput(err.to_string()),
            ServerClientError::ServerError { .. }
            | ServerClientError::AuthRequired
            | ServerClientError::ParseError(_) => CadenceError::Catalog(err.to_string()),
        }
    }
}
