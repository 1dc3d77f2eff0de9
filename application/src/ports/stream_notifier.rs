//! Stream notification port
//!
//! Defines the interface for reporting streaming reply progress.

use twin_domain::StreamChunk;

/// Callbacks fired while a streaming reply is consumed
///
/// Implementations live in the presentation layer and can display chunks
/// in various ways (console, transcript view, etc.)
///
/// For any one stream, `on_chunk` fires zero or more times, then at most
/// one of `on_done` / `on_error`. A cancelled stream fires neither.
pub trait StreamNotifier: Send + Sync {
    /// Called for each decoded chunk, in arrival order.
    fn on_chunk(&self, chunk: &StreamChunk);

    /// Called once when the stream completes normally.
    fn on_done(&self) {}

    /// Called once when the stream fails. No chunks follow.
    fn on_error(&self, _error: &str) {}
}

/// No-op notifier for when progress display is not needed
pub struct NoStreamNotifier;

impl StreamNotifier for NoStreamNotifier {
    fn on_chunk(&self, _chunk: &StreamChunk) {}
}
