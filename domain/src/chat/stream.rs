//! Streaming events for chat backend communication.
//!
//! [`StreamChunk`] is one decoded unit of a streaming reply. The backend
//! frames its stream as `data:`-prefixed lines whose payload is usually
//! JSON; a payload that does not parse is still delivered, as raw text.
//! [`StreamEvent`] wraps chunks together with the terminal outcomes.

use serde_json::Value;
use std::borrow::Cow;

/// One decoded unit of a streaming reply.
///
/// Decoding never drops a payload: parseable ones arrive as [`Json`],
/// everything else as [`Text`].
///
/// [`Json`]: StreamChunk::Json
/// [`Text`]: StreamChunk::Text
#[derive(Debug, Clone, PartialEq)]
pub enum StreamChunk {
    /// Payload that parsed as JSON.
    Json(Value),
    /// Payload delivered verbatim after a failed JSON parse.
    Text(String),
}

impl StreamChunk {
    /// The chunk as text for display and accumulation.
    ///
    /// A JSON string payload contributes its inner text (the common case:
    /// the backend streams tokens as JSON-encoded strings); any other JSON
    /// value is rendered compactly; raw text passes through unchanged.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            StreamChunk::Json(Value::String(s)) => Cow::Borrowed(s),
            StreamChunk::Json(value) => Cow::Owned(value.to_string()),
            StreamChunk::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// An event in a streaming chat reply.
///
/// Used to bridge infrastructure-level streaming (SSE-style chunks from the
/// backend) to the application layer, enabling real-time display.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A decoded chunk of the reply body.
    Chunk(StreamChunk),
    /// The reply body ended normally (signals stream end).
    Done,
    /// An error that occurred during streaming (signals stream end).
    Error(String),
}

impl StreamEvent {
    /// Returns the chunk if this is a Chunk event.
    pub fn chunk(&self) -> Option<&StreamChunk> {
        match self {
            StreamEvent::Chunk(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chunk_accessor_returns_content() {
        let event = StreamEvent::Chunk(StreamChunk::Text("hello".to_string()));
        assert_eq!(
            event.chunk(),
            Some(&StreamChunk::Text("hello".to_string()))
        );
        assert!(!event.is_terminal());
    }

    #[test]
    fn done_is_terminal() {
        assert!(StreamEvent::Done.is_terminal());
        assert_eq!(StreamEvent::Done.chunk(), None);
    }

    #[test]
    fn error_is_terminal() {
        let event = StreamEvent::Error("oops".to_string());
        assert!(event.is_terminal());
        assert_eq!(event.chunk(), None);
    }

    #[test]
    fn display_text_unwraps_json_string() {
        let chunk = StreamChunk::Json(json!("token "));
        assert_eq!(chunk.display_text(), "token ");
    }

    #[test]
    fn display_text_renders_other_json_compactly() {
        let chunk = StreamChunk::Json(json!({"token": "hi"}));
        assert_eq!(chunk.display_text(), r#"{"token":"hi"}"#);

        let chunk = StreamChunk::Json(json!(42));
        assert_eq!(chunk.display_text(), "42");
    }

    #[test]
    fn display_text_passes_raw_text_through() {
        let chunk = StreamChunk::Text("not json".to_string());
        assert_eq!(chunk.display_text(), "not json");
    }
}
