//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Stream replies token by token (`/stream` toggles this per session)
    pub streaming: bool,
    /// Show a spinner while waiting for non-streaming replies
    pub show_spinner: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            streaming: true,
            show_spinner: true,
            history_file: None,
        }
    }
}
