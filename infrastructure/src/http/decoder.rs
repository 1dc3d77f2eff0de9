//! Incremental decoder for the backend's `data:`-framed streaming body

use thiserror::Error;
use twin_domain::StreamChunk;

/// Hard decode failure: the body contains bytes that are not UTF-8.
///
/// Distinct from a multi-byte character split across network reads, which
/// the decoder carries to the next feed instead of failing.
#[derive(Error, Debug)]
#[error("Invalid UTF-8 in stream body: {0}")]
pub struct DecodeError(std::str::Utf8Error);

/// Decodes the backend's streaming body into [`StreamChunk`]s.
///
/// The body is a sequence of newline-terminated lines; lines starting with
/// `data:` carry a payload, everything else is framing noise. Network reads
/// can cut the body anywhere, so the decoder carries two kinds of partial
/// state across [`feed`](Self::feed) calls: an incomplete UTF-8 suffix and an
/// unterminated line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Undecoded trailing bytes of the previous feed (at most one partial
    /// character).
    byte_carry: Vec<u8>,
    /// Text of the current unterminated line.
    line_buf: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next slice of body bytes, returning every chunk whose
    /// terminating newline has now arrived.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<StreamChunk>, DecodeError> {
        self.byte_carry.extend_from_slice(bytes);

        let valid_up_to = match std::str::from_utf8(&self.byte_carry) {
            Ok(_) => self.byte_carry.len(),
            // error_len() of None means the buffer merely ends mid-character;
            // keep the incomplete suffix for the next feed
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(DecodeError(e)),
        };

        let text = std::str::from_utf8(&self.byte_carry[..valid_up_to]).map_err(DecodeError)?;
        self.line_buf.push_str(text);
        self.byte_carry.drain(..valid_up_to);

        let mut chunks = Vec::new();
        while let Some(pos) = self.line_buf.find('\n') {
            let line = self.line_buf[..pos].trim_end_matches('\r').to_string();
            self.line_buf.drain(..=pos);
            if let Some(chunk) = decode_line(&line) {
                chunks.push(chunk);
            }
        }
        Ok(chunks)
    }

    /// Flush the tail after the body ends.
    ///
    /// A final `data:` line without a trailing newline still yields its
    /// chunk. Bytes of a character truncated at EOF are dropped.
    pub fn finish(self) -> Option<StreamChunk> {
        let tail = self.line_buf.trim_end_matches('\r');
        decode_line(tail)
    }
}

/// Decode one complete line. Non-`data:` lines and empty payloads yield
/// nothing.
fn decode_line(line: &str) -> Option<StreamChunk> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    Some(match serde_json::from_str(payload) {
        Ok(value) => StreamChunk::Json(value),
        // Not JSON: deliver the raw text rather than dropping it
        Err(_) => StreamChunk::Text(payload.to_string()),
    })
}

// ==================== Tests ====================
