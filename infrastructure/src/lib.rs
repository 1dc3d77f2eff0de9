//! Infrastructure layer for twin-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileBackendConfig, FileConfig, FileLogConfig, FileReplConfig};
pub use http::{
    client::{DEFAULT_BASE_URL, HttpChatGateway},
    error::{BackendError, Result},
};
pub use logging::JsonlTranscriptLogger;
