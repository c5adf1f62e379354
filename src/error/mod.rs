//! Error handling
//!
//! Defines error types and handling for the hash server.

pub mod types;

pub use types::*;
