//! Error types for the backend HTTP adapter

use thiserror::Error;
use twin_application::GatewayError;

/// Result type alias for backend HTTP operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur when talking to the digital twin backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend answered with a non-success status code. `message` is
    /// already user-facing (taken from the error body when one was sent).
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("Stream decode error: {0}")]
    Decode(String),
}

/// Map a transport-level reqwest failure onto [`BackendError`].
pub fn map_reqwest_error(error: reqwest::Error) -> BackendError {
    if error.is_connect() {
        BackendError::Network(format!("Connection failed: {error}"))
    } else if error.is_timeout() {
        BackendError::Network(format!("Request timed out: {error}"))
    } else {
        BackendError::Network(error.to_string())
    }
}

impl From<BackendError> for GatewayError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Status { status, message } => GatewayError::Http { status, message },
            BackendError::Network(message) => GatewayError::Network(message),
            BackendError::UnexpectedBody(message) => GatewayError::InvalidResponse(message),
            BackendError::Decode(message) => GatewayError::Stream(message),
        }
    }
}

// ==================== Tests ====================
