//! Send Message use case.
//!
//! Sends a user message and waits for the complete reply — the
//! non-streaming request path.
//!
//! A failed request is not propagated as an error: the reply slot in the
//! conversation is filled with an `Error:` notice instead, so the
//! transcript always shows what happened to each message.

use crate::ports::chat_gateway::ChatGateway;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use std::sync::Arc;
use tracing::{info, warn};
use twin_domain::util::preview;
use twin_domain::{Conversation, DomainError, MessageId};

/// Result of a send: the assistant message that was appended, and whether
/// it carries the backend's reply or a substituted error notice.
#[derive(Debug, Clone)]
pub struct SendMessageOutput {
    pub message_id: MessageId,
    pub outcome: SendOutcome,
}

/// Terminal outcome of a non-streaming send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The backend replied with this text.
    Replied(String),
    /// The request failed; an `Error:` notice was substituted for the reply.
    Failed(String),
}

/// Use case for the non-streaming request path.
///
/// 1. Append the user message
/// 2. Request a complete generation from the gateway
/// 3. Append the reply — or an `Error:` notice if the request failed
pub struct SendMessageUseCase {
    gateway: Arc<dyn ChatGateway>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Execute the send, appending both sides of the exchange to
    /// `conversation`.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        message: &str,
    ) -> Result<SendMessageOutput, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        info!("Sending message: {}", preview(message, 100));

        let user_id = conversation.push_user(message);
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "id": user_id, "text": message }),
        ));

        match self.gateway.generate(message).await {
            Ok(reply) => {
                let message_id = conversation.push_assistant(&reply);
                info!("Received reply: {} bytes", reply.len());
                self.transcript.log(TranscriptEvent::new(
                    "assistant_message",
                    serde_json::json!({ "id": message_id, "text": reply, "streamed": false }),
                ));
                Ok(SendMessageOutput {
                    message_id,
                    outcome: SendOutcome::Replied(reply),
                })
            }
            Err(e) => {
                let error = e.to_string();
                warn!("Request failed: {error}");
                let message_id = conversation.push_assistant(format!("Error: {error}"));
                self.transcript.log(TranscriptEvent::new(
                    "request_error",
                    serde_json::json!({ "id": message_id, "error": error }),
                ));
                Ok(SendMessageOutput {
                    message_id,
                    outcome: SendOutcome::Failed(error),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{GatewayError, StreamSession};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use twin_domain::Role;

    // ==================== Test Mocks ====================

    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl MockGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn status(&self) -> Result<String, GatewayError> {
            Ok("running".to_string())
        }

        async fn health(&self) -> Result<String, GatewayError> {
            Ok("OK".to_string())
        }

        async fn generate(&self, _message: &str) -> Result<String, GatewayError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Network("no more replies".to_string())))
        }

        fn generate_stream(&self, _message: &str) -> StreamSession {
            unimplemented!("not used by SendMessage tests")
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn reply_is_appended_after_user_message() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("Hello there.".to_string())]));
        let use_case = SendMessageUseCase::new(gateway);
        let mut conversation = Conversation::new();

        let output = use_case.execute(&mut conversation, "hi").await.unwrap();

        assert_eq!(output.outcome, SendOutcome::Replied("Hello there.".to_string()));
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages()[0].content, "hi");
        let reply = conversation.message(output.message_id).unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Hello there.");
        assert!(!reply.streaming);
    }

    #[tokio::test]
    async fn failed_request_substitutes_error_notice() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::Http {
            status: 500,
            message: "Model unavailable".to_string(),
        })]));
        let use_case = SendMessageUseCase::new(gateway);
        let mut conversation = Conversation::new();

        let output = use_case.execute(&mut conversation, "hi").await.unwrap();

        assert_eq!(
            output.outcome,
            SendOutcome::Failed("Model unavailable".to_string())
        );
        // The user message stays; the reply slot carries the notice
        assert_eq!(conversation.len(), 2);
        let notice = conversation.message(output.message_id).unwrap();
        assert_eq!(notice.content, "Error: Model unavailable");
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_side_effects() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("unused".to_string())]));
        let use_case = SendMessageUseCase::new(gateway);
        let mut conversation = Conversation::new();

        let err = use_case.execute(&mut conversation, "   ").await.unwrap_err();

        assert!(matches!(err, DomainError::EmptyMessage));
        assert!(conversation.is_empty());
    }

    #[tokio::test]
    async fn input_whitespace_is_trimmed() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("ok".to_string())]));
        let use_case = SendMessageUseCase::new(gateway);
        let mut conversation = Conversation::new();

        use_case
            .execute(&mut conversation, "  hello\n")
            .await
            .unwrap();

        assert_eq!(conversation.messages()[0].content, "hello");
    }
}
