//! Error types
//!
//! Defines domain-specific error types for each module of the hash server.
//! Error values never carry plaintext secrets.

use std::fmt;
use std::io;

use crate::codec::{MAX_COST, MAX_SECRET_BYTES, MIN_COST};

/// Credential codec errors
///
/// A failed verification is not an error: `verify_secret` returns `Ok(false)`
/// on a well-formed mismatch. These variants cover rejected inputs and
/// algorithm failures only.
#[derive(Debug, PartialEq, Eq)]
pub enum CodecError {
    InvalidCost(u32),
    EmptySecret,
    InputTooLong(usize),
    MalformedDigest,
    Internal(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidCost(cost) => {
                write!(f, "Cost {} out of range ({}..={})", cost, MIN_COST, MAX_COST)
            }
            CodecError::EmptySecret => write!(f, "Secret must not be empty"),
            CodecError::InputTooLong(len) => {
                write!(f, "Secret is {} bytes, limit is {}", len, MAX_SECRET_BYTES)
            }
            CodecError::MalformedDigest => write!(f, "Malformed digest"),
            CodecError::Internal(msg) => write!(f, "Hashing failure: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

/// Identity registry errors
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryError {
    EmptyName,
    NotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyName => write!(f, "Identity name must not be empty"),
            RegistryError::NotFound(name) => write!(f, "Identity not found: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Startup errors surfaced to `main`
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}
