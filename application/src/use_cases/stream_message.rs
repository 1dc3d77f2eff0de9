//! Stream Message use case.
//!
//! Sends a user message and consumes the streaming reply chunk by chunk,
//! growing an assistant message in the conversation as text arrives.
//!
//! Terminal discipline: for any one stream, the notifier sees at most one
//! of `on_done` / `on_error`, and a cancelled stream sees neither — the
//! channel just closes. The streaming message itself is always sealed
//! before this use case returns.

use crate::ports::chat_gateway::ChatGateway;
use crate::ports::stream_notifier::StreamNotifier;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use twin_domain::util::preview;
use twin_domain::{Conversation, DomainError, MessageId, StreamEvent};

/// Result of a completed (or failed) stream.
#[derive(Debug, Clone)]
pub struct StreamMessageOutput {
    /// The assistant message that accumulated the reply.
    pub message_id: MessageId,
    pub outcome: StreamOutcome,
}

/// Terminal outcome of a streaming send.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// The backend closed the stream normally.
    Completed,
    /// The backend reported a failure; the message content was replaced
    /// with an `Error:` notice.
    Failed(String),
}

/// How the event loop ended. Cancellation and a silently closed channel
/// both mean the transfer was aborted.
enum StreamEnd {
    Done,
    Failed(String),
    Aborted,
}

/// Use case for the streaming request path.
///
/// 1. Append the user message and an empty streaming assistant message
/// 2. Start a streaming generation on the gateway
/// 3. Append each chunk as it arrives, forwarding it to the notifier
/// 4. Seal the assistant message on the terminal event — or on
///    cancellation, which fires no notifier callback at all
pub struct StreamMessageUseCase {
    gateway: Arc<dyn ChatGateway>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl StreamMessageUseCase {
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

    /// Execute the streaming send.
    ///
    /// Returns [`DomainError::Cancelled`] when `cancellation` fires first;
    /// callers that wired the token should treat that as a quiet outcome,
    /// not a failure.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        message: &str,
        notifier: &dyn StreamNotifier,
        cancellation: &CancellationToken,
    ) -> Result<StreamMessageOutput, DomainError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        info!("Streaming message: {}", preview(message, 100));

        let user_id = conversation.push_user(message);
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "id": user_id, "text": message }),
        ));

        let message_id = conversation.begin_streaming();
        let mut session = self.gateway.generate_stream(message);
        let mut chunks = 0usize;

        let end = loop {
            // `biased` so a cancellation wins over queued chunks
            let event = tokio::select! {
                biased;
                _ = cancellation.cancelled() => break StreamEnd::Aborted,
                event = session.events.recv() => event,
            };
            match event {
                Some(StreamEvent::Chunk(chunk)) => {
                    chunks += 1;
                    conversation.append_chunk(message_id, &chunk.display_text())?;
                    notifier.on_chunk(&chunk);
                }
                Some(StreamEvent::Done) => break StreamEnd::Done,
                Some(StreamEvent::Error(error)) => break StreamEnd::Failed(error),
                // Closed with no terminal event: the transfer was aborted
                None => break StreamEnd::Aborted,
            }
        };

        match end {
            StreamEnd::Done => {
                conversation.finish_streaming(message_id)?;
                notifier.on_done();
                let text = conversation
                    .message(message_id)
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                info!("Stream completed: {chunks} chunks, {} bytes", text.len());
                self.transcript.log(TranscriptEvent::new(
                    "assistant_message",
                    serde_json::json!({ "id": message_id, "text": text, "streamed": true }),
                ));
                Ok(StreamMessageOutput {
                    message_id,
                    outcome: StreamOutcome::Completed,
                })
            }
            StreamEnd::Failed(error) => {
                warn!("Stream failed after {chunks} chunks: {error}");
                conversation.fail_streaming(message_id, &error)?;
                notifier.on_error(&error);
                self.transcript.log(TranscriptEvent::new(
                    "stream_error",
                    serde_json::json!({ "id": message_id, "error": error }),
                ));
                Ok(StreamMessageOutput {
                    message_id,
                    outcome: StreamOutcome::Failed(error),
                })
            }
            StreamEnd::Aborted => {
                session.cancel();
                conversation.finish_streaming(message_id)?;
                info!("Stream cancelled after {chunks} chunks");
                self.transcript.log(TranscriptEvent::new(
                    "stream_cancelled",
                    serde_json::json!({ "id": message_id, "chunks": chunks }),
                ));
                Err(DomainError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::{GatewayError, StreamSession};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use twin_domain::{Role, StreamChunk};

    // ==================== Test Mocks ====================

    struct MockGateway {
        scripts: Mutex<VecDeque<Vec<StreamEvent>>>,
    }

    impl MockGateway {
        fn new(scripts: Vec<Vec<StreamEvent>>) -> Self {
            Self {
                scripts: Mutex::new(VecDeque::from(scripts)),
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
            unimplemented!("not used by StreamMessage tests")
        }

        fn generate_stream(&self, _message: &str) -> StreamSession {
            let events = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default();
            let (tx, rx) = mpsc::channel(8);
            // Sender drops when the script runs out, closing the channel
            tokio::spawn(async move {
                for event in events {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            });
            StreamSession::new(rx, CancellationToken::new())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StreamNotifier for RecordingNotifier {
        fn on_chunk(&self, chunk: &StreamChunk) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("chunk:{}", chunk.display_text()));
        }

        fn on_done(&self) {
            self.calls.lock().unwrap().push("done".to_string());
        }

        fn on_error(&self, error: &str) {
            self.calls.lock().unwrap().push(format!("error:{error}"));
        }
    }

    fn text_chunk(s: &str) -> StreamEvent {
        StreamEvent::Chunk(StreamChunk::Text(s.to_string()))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn chunks_grow_the_assistant_message_until_done() {
        let gateway = Arc::new(MockGateway::new(vec![vec![
            text_chunk("Hel"),
            text_chunk("lo"),
            StreamEvent::Done,
        ]]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();

        let output = use_case
            .execute(&mut conversation, "hi", &notifier, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.outcome, StreamOutcome::Completed);
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role, Role::User);
        let reply = conversation.message(output.message_id).unwrap();
        assert_eq!(reply.content, "Hello");
        assert!(!reply.streaming);
        assert_eq!(notifier.calls(), vec!["chunk:Hel", "chunk:lo", "done"]);
    }

    #[tokio::test]
    async fn json_chunks_accumulate_their_display_text() {
        let gateway = Arc::new(MockGateway::new(vec![vec![
            StreamEvent::Chunk(StreamChunk::Json(json!("A "))),
            StreamEvent::Chunk(StreamChunk::Json(json!({"token": "B"}))),
            StreamEvent::Done,
        ]]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();

        let output = use_case
            .execute(&mut conversation, "hi", &notifier, &CancellationToken::new())
            .await
            .unwrap();

        let reply = conversation.message(output.message_id).unwrap();
        assert_eq!(reply.content, r#"A {"token":"B"}"#);
    }

    #[tokio::test]
    async fn stream_error_substitutes_content_and_fires_on_error_once() {
        let gateway = Arc::new(MockGateway::new(vec![vec![
            text_chunk("par"),
            StreamEvent::Error("stream interrupted".to_string()),
        ]]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();

        let output = use_case
            .execute(&mut conversation, "hi", &notifier, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            output.outcome,
            StreamOutcome::Failed("stream interrupted".to_string())
        );
        let reply = conversation.message(output.message_id).unwrap();
        assert_eq!(reply.content, "Error: stream interrupted");
        assert!(!reply.streaming);
        assert_eq!(
            notifier.calls(),
            vec!["chunk:par", "error:stream interrupted"]
        );
    }

    #[tokio::test]
    async fn cancellation_before_first_event_fires_no_callbacks() {
        let gateway = Arc::new(MockGateway::new(vec![vec![
            text_chunk("never seen"),
            StreamEvent::Done,
        ]]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let err = use_case
            .execute(&mut conversation, "hi", &notifier, &cancellation)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(notifier.calls().is_empty());
        // The streaming message is sealed, keeping whatever arrived (nothing)
        let reply = conversation.last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "");
        assert!(!reply.streaming);
    }

    #[tokio::test]
    async fn closed_channel_without_terminal_is_treated_as_aborted() {
        // Script ends without Done or Error: the sender just drops
        let gateway = Arc::new(MockGateway::new(vec![vec![text_chunk("a")]]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();

        let err = use_case
            .execute(&mut conversation, "hi", &notifier, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(notifier.calls(), vec!["chunk:a"]);
        let reply = conversation.last().unwrap();
        assert_eq!(reply.content, "a");
        assert!(!reply.streaming);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_side_effects() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let use_case = StreamMessageUseCase::new(gateway);
        let notifier = RecordingNotifier::default();
        let mut conversation = Conversation::new();

        let err = use_case
            .execute(&mut conversation, "  ", &notifier, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmptyMessage));
        assert!(conversation.is_empty());
        assert!(notifier.calls().is_empty());
    }
}
