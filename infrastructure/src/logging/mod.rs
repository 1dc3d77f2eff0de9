//! Logging infrastructure — structured transcript logging.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](twin_application::TranscriptLogger) port.

mod transcript;

pub use transcript::JsonlTranscriptLogger;
