//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for the digital twin.

mod repl;

pub use repl::ChatRepl;
