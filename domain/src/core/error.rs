//! Domain error types

use crate::chat::entities::MessageId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown message id {0}")]
    UnknownMessage(MessageId),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::entities::Conversation;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        let mut conversation = Conversation::new();
        let id = conversation.push_user("hi");

        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::EmptyMessage.is_cancelled());
        assert!(!DomainError::UnknownMessage(id).is_cancelled());
    }
}
