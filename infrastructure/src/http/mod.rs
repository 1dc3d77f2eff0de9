//! HTTP adapter for the digital twin backend
//!
//! Implements ChatGateway over the backend's REST and streaming endpoints.

pub mod client;
pub mod decoder;
pub mod error;
pub mod protocol;
