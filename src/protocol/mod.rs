//! Wire protocol implementation
//!
//! Handles command parsing, dispatch, and response generation for the
//! line-oriented request/response contract the core is invoked through.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
