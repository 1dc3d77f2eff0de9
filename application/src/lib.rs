//! Application layer for twin-chat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError, StreamSession},
    stream_notifier::{NoStreamNotifier, StreamNotifier},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::check_status::CheckStatusUseCase;
pub use use_cases::send_message::{SendMessageOutput, SendMessageUseCase, SendOutcome};
pub use use_cases::stream_message::{StreamMessageOutput, StreamMessageUseCase, StreamOutcome};
