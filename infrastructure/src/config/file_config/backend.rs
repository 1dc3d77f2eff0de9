//! Backend connection configuration from TOML (`[backend]` section)

use crate::http::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the digital twin service
    pub base_url: String,
    /// Connection establishment timeout in seconds (unset: unbounded)
    pub connect_timeout_secs: Option<u64>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: None,
        }
    }
}

impl FileBackendConfig {
    /// Connect timeout as a `Duration`, `None` when unbounded
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}
