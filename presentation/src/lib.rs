//! Presentation layer for twin-chat
//!
//! This crate contains CLI definitions, output formatters, the live
//! stream printer, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod stream;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::spinner::ResponseSpinner;
pub use stream::printer::StreamPrinter;
