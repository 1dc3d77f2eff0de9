//! Prints streamed reply chunks to stdout as they arrive

use crate::ConsoleFormatter;
use std::io::{self, Write};
use twin_application::StreamNotifier;
use twin_domain::StreamChunk;

/// Live printer for streamed chunks.
///
/// Each chunk is printed and flushed immediately so tokens appear as the
/// model produces them. The terminal callbacks close the line; a cancelled
/// stream fires neither, so callers should [`finish`](Self::finish) the
/// printer when the reply ends.
pub struct StreamPrinter;

impl StreamPrinter {
    pub fn new() -> Self {
        Self
    }

    /// Flush anything left on the in-progress line.
    pub fn finish(&self) {
        let _ = io::stdout().flush();
    }
}

impl Default for StreamPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamNotifier for StreamPrinter {
    fn on_chunk(&self, chunk: &StreamChunk) {
        print!("{}", chunk.display_text());
        let _ = io::stdout().flush();
    }

    fn on_done(&self) {
        println!();
    }

    fn on_error(&self, error: &str) {
        println!();
        eprintln!("{}", ConsoleFormatter::error_line(error));
    }
}
