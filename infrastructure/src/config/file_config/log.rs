//! Transcript logging configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Write a JSONL transcript of each chat session
    pub transcript: bool,
    /// Explicit transcript file path (unset: timestamped file under the
    /// user data directory)
    pub transcript_file: Option<String>,
}
