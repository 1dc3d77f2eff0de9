//! Chat gateway port
//!
//! Defines the interface for communicating with the digital twin backend.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use twin_domain::StreamEvent;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own error message when the error body
    /// could be parsed, otherwise `Request failed: <status>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with success but the body was not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A failure reported mid-stream, after the transfer began.
    #[error("{0}")]
    Stream(String),
}

/// Gateway for backend communication
///
/// This port defines how the application layer talks to the digital twin
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Fetch the backend's status line.
    async fn status(&self) -> Result<String, GatewayError>;

    /// Fetch the backend's liveness probe.
    async fn health(&self) -> Result<String, GatewayError>;

    /// Request a complete generation for `message`.
    async fn generate(&self, message: &str) -> Result<String, GatewayError>;

    /// Start a streaming generation for `message`.
    ///
    /// Returns before any network activity; events arrive on the session's
    /// channel. Request failures are reported as a [`StreamEvent::Error`]
    /// on that channel, not as a return value.
    fn generate_stream(&self, message: &str) -> StreamSession;
}

/// Handle for an in-flight streaming generation.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` plus the token that aborts the
/// transfer. The channel yields any number of `Chunk` events followed by at
/// most one terminal event; after [`cancel`](StreamSession::cancel) the
/// channel simply closes, with no terminal event.
pub struct StreamSession {
    pub events: mpsc::Receiver<StreamEvent>,
    cancellation: CancellationToken,
}

impl StreamSession {
    pub fn new(events: mpsc::Receiver<StreamEvent>, cancellation: CancellationToken) -> Self {
        Self {
            events,
            cancellation,
        }
    }

    /// Abort the transfer. Idempotent; events already decoded are dropped.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Consume the stream and collect all chunk text into a single string.
    ///
    /// Useful when the transport streams but the caller only needs the
    /// final text.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.events.recv().await {
            match event {
                StreamEvent::Chunk(chunk) => full_text.push_str(&chunk.display_text()),
                StreamEvent::Done => return Ok(full_text),
                StreamEvent::Error(e) => {
                    return Err(GatewayError::Stream(e));
                }
            }
        }
        // Channel closed without Done — cancelled; return what arrived
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_domain::StreamChunk;

    fn session_with(events: Vec<StreamEvent>) -> StreamSession {
        let (tx, rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        StreamSession::new(rx, token)
    }

    #[tokio::test]
    async fn collect_text_joins_chunks_until_done() {
        let session = session_with(vec![
            StreamEvent::Chunk(StreamChunk::Text("Hel".to_string())),
            StreamEvent::Chunk(StreamChunk::Text("lo".to_string())),
            StreamEvent::Done,
        ]);
        assert_eq!(session.collect_text().await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_error() {
        let session = session_with(vec![
            StreamEvent::Chunk(StreamChunk::Text("par".to_string())),
            StreamEvent::Error("connection reset".to_string()),
        ]);
        let err = session.collect_text().await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn collect_text_returns_partial_on_closed_channel() {
        // No terminal event: sender drops after the chunks
        let session = session_with(vec![StreamEvent::Chunk(StreamChunk::Text(
            "partial".to_string(),
        ))]);
        assert_eq!(session.collect_text().await.unwrap(), "partial");
    }

    #[test]
    fn http_error_displays_backend_message() {
        let err = GatewayError::Http {
            status: 500,
            message: "Request failed: 500".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed: 500");
    }
}
