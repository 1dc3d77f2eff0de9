//! Chat conversation domain.
//!
//! - [`entities::Conversation`] — an ordered transcript of messages
//! - [`entities::Message`] — a single message within a conversation
//! - [`stream::StreamChunk`] — one decoded unit of a streaming reply
//! - [`status::BackendHealth`] — reachability of the backend service

pub mod entities;
pub mod status;
pub mod stream;
