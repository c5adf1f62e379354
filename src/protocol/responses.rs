//! Response handling
//!
//! Defines wire response codes and formatting.

/// Standard response codes
pub const OK: u16 = 200;
pub const HASHED: u16 = 210;
pub const MATCH: u16 = 211;
pub const MISMATCH: u16 = 212;
pub const FOUND: u16 = 213;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const SERVER_BUSY: u16 = 421;
pub const UNRECOGNIZED: u16 = 500;
pub const SYNTAX_ERROR: u16 = 501;
pub const REJECTED: u16 = 550;
pub const NOT_FOUND: u16 = 551;

/// Format a response message
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}
