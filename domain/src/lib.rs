//! Domain layer for twin-chat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A [`chat::entities::Conversation`] is an ordered transcript of
//! [`chat::entities::Message`]s. Assistant replies may stream: a streaming
//! message is appended empty, grows chunk by chunk, and is sealed exactly
//! once by a terminal event or by cancellation.
//!
//! ## Stream values
//!
//! [`chat::stream::StreamChunk`] is one decoded unit of a streaming reply:
//! structured JSON when the payload parses, raw text when it does not.
//! [`chat::stream::StreamEvent`] wraps chunks together with the terminal
//! outcomes of a stream.

pub mod chat;
pub mod core;
pub mod util;

// Re-export commonly used types
pub use chat::{
    entities::{Conversation, Message, MessageId, Role},
    status::BackendHealth,
    stream::{StreamChunk, StreamEvent},
};
pub use core::error::DomainError;
