//! Command handlers module for the Saltbox server.
//!
//! This module defines handler functions for wire commands, covering the
//! hash/compare credential paths and the identity registry operations. The
//! expensive work (hashing) always happens outside the registry lock, and
//! handlers attach advisory elapsed-time metadata to hashing replies.

use log::{error, info};
use std::time::Instant;

use crate::codec::{self, Digest};
use crate::config::ServerConfig;
use crate::error::{CodecError, RegistryError};
use crate::protocol::responses::{self, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::registry::IdentityRegistry;

/// Dispatches a received command to its corresponding handler.
///
/// # Arguments
///
/// * `command` - Reference to the parsed command enum.
/// * `registry` - Shared identity registry.
/// * `config` - Server configuration (supplies the default cost factor).
///
/// # Returns
///
/// * `CommandResult` - Result of the command execution, including status and message.
pub fn handle_command(
    command: &Command,
    registry: &IdentityRegistry,
    config: &ServerConfig,
) -> CommandResult {
    match command {
        Command::HASH {
            secret,
            cost,
            pre_encode,
        } => handle_cmd_hash(secret, *cost, *pre_encode, config),
        Command::COMPARE {
            digest,
            candidate,
            pre_encode,
        } => handle_cmd_compare(digest, candidate, *pre_encode),
        Command::STORE { name, digest } => handle_cmd_store(registry, name, digest),
        Command::FIND { name } => handle_cmd_find(registry, name),
        Command::ENROLL {
            name,
            secret,
            cost,
            pre_encode,
        } => handle_cmd_enroll(registry, name, secret, *cost, *pre_encode, config),
        Command::CHECK {
            name,
            candidate,
            pre_encode,
        } => handle_cmd_check(registry, name, candidate, *pre_encode),
        Command::PING => handle_cmd_ping(),
        Command::QUIT => handle_cmd_quit(),
        Command::UNKNOWN => handle_cmd_unknown(),
    }
}

/// Converts a codec rejection into a failure response.
///
/// `CodecError` values never carry plaintext, so their display form is safe
/// to send and log.
fn codec_failure(error: CodecError) -> CommandResult {
    error!("Codec rejected request: {}", error);
    CommandResult {
        status: CommandStatus::Failure(error.to_string()),
        message: Some(format_response(responses::REJECTED, &error.to_string())),
    }
}

/// Converts a registry failure into a failure response.
fn registry_failure(error: RegistryError) -> CommandResult {
    let code = match &error {
        RegistryError::EmptyName => responses::SYNTAX_ERROR,
        RegistryError::NotFound(_) => responses::NOT_FOUND,
    };
    CommandResult {
        status: CommandStatus::Failure(error.to_string()),
        message: Some(format_response(code, &error.to_string())),
    }
}

/// Handles the HASH command: produces a salted digest of the secret.
fn handle_cmd_hash(
    secret: &str,
    cost: Option<u32>,
    pre_encode: bool,
    config: &ServerConfig,
) -> CommandResult {
    let cost = cost.unwrap_or(config.default_cost);

    let started = Instant::now();
    match codec::hash_secret(secret, cost, pre_encode) {
        Ok(digest) => {
            let elapsed = started.elapsed();
            info!("Hashed secret at cost {} in {:?}", cost, elapsed);
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(
                    responses::HASHED,
                    &format!("{} elapsed={:?}", digest, elapsed),
                )),
            }
        }
        Err(e) => codec_failure(e),
    }
}

/// Handles the COMPARE command: verifies a candidate against a digest.
///
/// The reply is tri-state: Match, Mismatch, or a 550 rejection for a
/// malformed digest. A mismatch is an expected outcome, not a failure.
fn handle_cmd_compare(digest: &str, candidate: &str, pre_encode: bool) -> CommandResult {
    // 1. Parse before burning CPU on a digest that can never verify
    let digest = match Digest::parse(digest) {
        Ok(digest) => digest,
        Err(e) => return codec_failure(e),
    };

    // 2. Verify with the cost and salt embedded in the digest
    let started = Instant::now();
    match codec::verify_secret(&digest, candidate, pre_encode) {
        Ok(matched) => {
            let elapsed = started.elapsed();
            info!("Compared candidate against digest in {:?}", elapsed);
            let (code, outcome) = if matched {
                (responses::MATCH, "Match")
            } else {
                (responses::MISMATCH, "Mismatch")
            };
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(
                    code,
                    &format!("{} elapsed={:?}", outcome, elapsed),
                )),
            }
        }
        Err(e) => codec_failure(e),
    }
}

/// Handles the STORE command: records a digest under an identity name.
///
/// Creates the identity on first store, overwrites the digest afterwards.
fn handle_cmd_store(registry: &IdentityRegistry, name: &str, digest: &str) -> CommandResult {
    // Digest must be structurally valid before it lands in the registry
    let digest = match Digest::parse(digest) {
        Ok(digest) => digest,
        Err(e) => return codec_failure(e),
    };

    match registry.store(name, digest) {
        Ok(identity) => {
            info!("Stored digest for {} (id={})", identity.name(), identity.id());
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(
                    responses::OK,
                    &format!("Stored {} id={}", identity.name(), identity.id()),
                )),
            }
        }
        Err(e) => registry_failure(e),
    }
}

/// Handles the FIND command: returns the current record for a name.
fn handle_cmd_find(registry: &IdentityRegistry, name: &str) -> CommandResult {
    match registry.find(name) {
        Ok(identity) => CommandResult {
            status: CommandStatus::Success,
            message: Some(format_response(
                responses::FOUND,
                &format!(
                    "{} id={} {}",
                    identity.name(),
                    identity.id(),
                    identity.digest()
                ),
            )),
        },
        Err(e) => registry_failure(e),
    }
}

/// Handles the ENROLL command: hashes a secret and stores the digest under a
/// name in one request.
fn handle_cmd_enroll(
    registry: &IdentityRegistry,
    name: &str,
    secret: &str,
    cost: Option<u32>,
    pre_encode: bool,
    config: &ServerConfig,
) -> CommandResult {
    let cost = cost.unwrap_or(config.default_cost);

    // 1. Hash first, outside the registry lock
    let started = Instant::now();
    let digest = match codec::hash_secret(secret, cost, pre_encode) {
        Ok(digest) => digest,
        Err(e) => return codec_failure(e),
    };
    let elapsed = started.elapsed();

    // 2. Persist the digest under the identity name
    match registry.store(name, digest) {
        Ok(identity) => {
            info!(
                "Enrolled {} (id={}) at cost {} in {:?}",
                identity.name(),
                identity.id(),
                cost,
                elapsed
            );
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(
                    responses::OK,
                    &format!(
                        "Enrolled {} id={} {} elapsed={:?}",
                        identity.name(),
                        identity.id(),
                        identity.digest(),
                        elapsed
                    ),
                )),
            }
        }
        Err(e) => registry_failure(e),
    }
}

/// Handles the CHECK command: verifies a candidate against the digest stored
/// for a name.
fn handle_cmd_check(
    registry: &IdentityRegistry,
    name: &str,
    candidate: &str,
    pre_encode: bool,
) -> CommandResult {
    // 1. Look up the record; the lock is released before hashing starts
    let identity = match registry.find(name) {
        Ok(identity) => identity,
        Err(e) => return registry_failure(e),
    };

    // 2. Verify against the stored digest
    let started = Instant::now();
    match codec::verify_secret(identity.digest(), candidate, pre_encode) {
        Ok(matched) => {
            let elapsed = started.elapsed();
            info!("Checked candidate for {} in {:?}", identity.name(), elapsed);
            let (code, outcome) = if matched {
                (responses::MATCH, "Match")
            } else {
                (responses::MISMATCH, "Mismatch")
            };
            CommandResult {
                status: CommandStatus::Success,
                message: Some(format_response(
                    code,
                    &format!("{} elapsed={:?}", outcome, elapsed),
                )),
            }
        }
        Err(e) => codec_failure(e),
    }
}

/// Handles the PING command: returns a fixed success message.
fn handle_cmd_ping() -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format_response(responses::OK, "Pong")),
    }
}

/// Handles the QUIT command: signals connection close.
fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::GOODBYE, "Goodbye")),
    }
}

/// Handles unknown or unsupported commands: returns error response.
fn handle_cmd_unknown() -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure("Unknown command".into()),
        message: Some(format_response(
            responses::UNRECOGNIZED,
            "Syntax error, command unrecognized",
        )),
    }
}
