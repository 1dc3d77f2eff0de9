//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot replies
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain reply text
    Text,
    /// JSON object with the message, reply and delivery mode
    Json,
}

/// CLI arguments for twin-chat
#[derive(Parser, Debug)]
#[command(name = "twin-chat")]
#[command(author, version, about = "Terminal chat for a digital twin backend")]
#[command(long_about = r#"
twin-chat talks to a digital twin text-generation service: one-shot
messages from the command line, or an interactive chat session.

Replies stream token by token by default; --no-stream waits for the
complete reply instead. Ctrl-C aborts an in-flight streaming reply
without ending the chat session.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./twin.toml         Project-level config
3. ~/.config/twin-chat/config.toml   Global config

Example:
  twin-chat "What are you working on these days?"
  twin-chat --no-stream --output json "Introduce yourself"
  twin-chat --chat --base-url http://twin.internal:8080/api/digital-twin
"#)]
pub struct Cli {
    /// The message to send (omit to start chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Stream the reply token by token
    #[arg(long)]
    pub stream: bool,

    /// Wait for the complete reply instead of streaming
    #[arg(long)]
    pub no_stream: bool,

    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format for one-shot replies
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Streaming preference from the flags; `None` defers to config.
    /// `--no-stream` wins if both flags are given.
    pub fn streaming(&self) -> Option<bool> {
        if self.no_stream {
            Some(false)
        } else if self.stream {
            Some(true)
        } else {
            None
        }
    }
}
