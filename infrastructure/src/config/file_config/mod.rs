//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; unset fields fall back to built-in
//! defaults.

mod backend;
mod log;
mod repl;

pub use backend::FileBackendConfig;
pub use log::FileLogConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection settings
    pub backend: FileBackendConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript logging settings
    pub log: FileLogConfig,
}
