//! Configuration file loading for twin-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./twin.toml` or `./.twin.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/twin-chat/config.toml`
//! 4. Fallback: `~/.config/twin-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileBackendConfig, FileConfig, FileLogConfig, FileReplConfig};
pub use loader::ConfigLoader;
