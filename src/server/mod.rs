//! Server core functionality
//!
//! This module contains the accept loop and per-connection session handling
//! for the hash server.

pub mod core;
pub mod session;

pub use core::Server;
