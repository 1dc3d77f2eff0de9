//! Wire format for the digital twin backend
//!
//! Request and response bodies for the REST endpoints, plus the error body
//! shape produced by the backend's exception handler.

use serde::{Deserialize, Serialize};

/// Request body for `POST /ai/generate` and `POST /ai/generateStream`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body of a successful `POST /ai/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    pub generation: String,
}

/// Response body of `GET /` (service status) and `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Error body sent by the backend on non-success responses.
///
/// The backend also includes `timestamp`, `status` and `error` fields; only
/// the human-readable message matters here.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Extract a user-facing message from a non-success response body.
///
/// Prefers the `message` field of the backend's JSON error body. Falls back
/// to `"{fallback}: {status}"` when the body is not JSON or carries no
/// message.
pub fn error_message(status: u16, body: &str, fallback: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => format!("{fallback}: {status}"),
    }
}

// ==================== Tests ====================
