//! Conversation domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Identity of a message within its conversation.
///
/// Allocated by [`Conversation`] from a monotonic counter, so ids are unique
/// and ordered by creation time. The counter survives [`Conversation::clear`]
/// to keep old ids from being reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// True while an assistant reply is still receiving chunks.
    pub streaming: bool,
}

impl Message {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            streaming: false,
        }
    }

    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: content.into(),
            streaming: false,
        }
    }

    /// An empty assistant message that will grow chunk by chunk.
    pub fn streaming_placeholder(id: MessageId) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: String::new(),
            streaming: true,
        }
    }
}

/// An ordered transcript of messages (Aggregate)
///
/// Messages are append-only. A streaming assistant message accepts chunks
/// until it is sealed by [`finish_streaming`] or [`fail_streaming`]; chunks
/// arriving after that are dropped silently, so a late event from an
/// already-terminated stream cannot mutate a sealed message.
///
/// [`finish_streaming`]: Conversation::finish_streaming
/// [`fail_streaming`]: Conversation::fail_streaming
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a user message and return its id.
    pub fn push_user(&mut self, content: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(Message::user(id, content));
        id
    }

    /// Append a completed assistant message and return its id.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(Message::assistant(id, content));
        id
    }

    /// Append an empty assistant message in streaming state and return its id.
    pub fn begin_streaming(&mut self) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(Message::streaming_placeholder(id));
        id
    }

    /// Append text to a streaming message.
    ///
    /// Ignored once the message has been sealed.
    pub fn append_chunk(&mut self, id: MessageId, text: &str) -> Result<(), DomainError> {
        let message = self.get_mut(id)?;
        if message.streaming {
            message.content.push_str(text);
        }
        Ok(())
    }

    /// Seal a streaming message, keeping the content accumulated so far.
    ///
    /// Used both when the stream completes and when it is cancelled mid-way.
    /// Idempotent.
    pub fn finish_streaming(&mut self, id: MessageId) -> Result<(), DomainError> {
        self.get_mut(id)?.streaming = false;
        Ok(())
    }

    /// Seal a streaming message, replacing its content with an error notice.
    ///
    /// Ignored once the message has been sealed: the first terminal
    /// transition wins.
    pub fn fail_streaming(&mut self, id: MessageId, error: &str) -> Result<(), DomainError> {
        let message = self.get_mut(id)?;
        if message.streaming {
            message.content = format!("Error: {error}");
            message.streaming = false;
        }
        Ok(())
    }

    /// Remove all messages. Message ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn get_mut(&mut self, id: MessageId) -> Result<&mut Message, DomainError> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::UnknownMessage(id))
    }
}
