//! Waiting indicators

pub mod spinner;
