//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_status;
pub mod send_message;
pub mod stream_message;
