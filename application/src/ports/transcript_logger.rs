//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording chat events (user
//! messages, assistant replies, stream outcomes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! conversation itself in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured chat event for logging.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; implementations add the timestamp when writing.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "user_message", "assistant_message").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging chat events to a structured transcript.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible to
/// avoid disrupting the chat flow — logging failures are silently ignored.
pub trait TranscriptLogger: Send + Sync {
    /// Record a chat event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcript logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
