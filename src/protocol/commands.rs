//! Module `commands`
//!
//! Defines the wire command parsing logic and related data structures used to
//! represent commands, their status, and results.

use std::fmt;

/// Represents a command parsed from client input.
///
/// `HASH`/`COMPARE` are the two core requests; `STORE`/`FIND` expose the
/// identity registry; `ENROLL`/`CHECK` compose the two (hash-then-store and
/// find-then-verify). Plaintext-bearing fields are redacted from the `Debug`
/// form so command logging can never leak a secret.
#[derive(PartialEq, Eq)]
pub enum Command {
    /// Hash a secret: `HASH <secret> [cost] [B64]`
    HASH {
        secret: String,
        cost: Option<u32>,
        pre_encode: bool,
    },
    /// Verify a candidate against a digest: `COMPARE <digest> <secret> [B64]`
    COMPARE {
        digest: String,
        candidate: String,
        pre_encode: bool,
    },
    /// Store a digest under a name: `STORE <name> <digest>`
    STORE { name: String, digest: String },
    /// Look up a stored record: `FIND <name>`
    FIND { name: String },
    /// Hash a secret and store the digest: `ENROLL <name> <secret> [cost] [B64]`
    ENROLL {
        name: String,
        secret: String,
        cost: Option<u32>,
        pre_encode: bool,
    },
    /// Verify a candidate against a stored record: `CHECK <name> <secret> [B64]`
    CHECK {
        name: String,
        candidate: String,
        pre_encode: bool,
    },
    PING,
    QUIT,
    /// Unknown command, or a known command with malformed arguments
    UNKNOWN,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::HASH { cost, pre_encode, .. } => {
                write!(f, "HASH <redacted> cost={:?} b64={}", cost, pre_encode)
            }
            Command::COMPARE { pre_encode, .. } => {
                write!(f, "COMPARE <digest> <redacted> b64={}", pre_encode)
            }
            Command::STORE { name, .. } => write!(f, "STORE {} <digest>", name),
            Command::FIND { name } => write!(f, "FIND {}", name),
            Command::ENROLL {
                name,
                cost,
                pre_encode,
                ..
            } => write!(f, "ENROLL {} <redacted> cost={:?} b64={}", name, cost, pre_encode),
            Command::CHECK { name, pre_encode, .. } => {
                write!(f, "CHECK {} <redacted> b64={}", name, pre_encode)
            }
            Command::PING => write!(f, "PING"),
            Command::QUIT => write!(f, "QUIT"),
            Command::UNKNOWN => write!(f, "UNKNOWN"),
        }
    }
}

/// Represents the outcome status of executing a command.
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses trailing `[cost] [B64]` options, in either order.
fn parse_options(rest: &[&str]) -> Option<(Option<u32>, bool)> {
    let mut cost = None;
    let mut pre_encode = false;

    for token in rest {
        if token.eq_ignore_ascii_case("B64") && !pre_encode {
            pre_encode = true;
        } else if cost.is_none() {
            cost = Some(token.parse().ok()?);
        } else {
            return None;
        }
    }

    Some((cost, pre_encode))
}

/// Parses an optional trailing `[B64]` flag.
fn parse_b64_flag(rest: &[&str]) -> Option<bool> {
    match rest {
        [] => Some(false),
        [flag] if flag.eq_ignore_ascii_case("B64") => Some(true),
        _ => None,
    }
}

/// Parses a raw command string received from a client into the `Command` enum.
///
/// Validates required arguments and returns `UNKNOWN` if a known command is
/// misused. Arguments are whitespace-separated, so secrets and names cannot
/// contain spaces.
pub fn parse_command(raw: &str) -> Command {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Command::UNKNOWN;
    };

    match verb.to_ascii_uppercase().as_str() {
        "HASH" => match args {
            [secret, rest @ ..] => match parse_options(rest) {
                Some((cost, pre_encode)) => Command::HASH {
                    secret: secret.to_string(),
                    cost,
                    pre_encode,
                },
                None => Command::UNKNOWN,
            },
            _ => Command::UNKNOWN,
        },
        "COMPARE" => match args {
            [digest, candidate, rest @ ..] => match parse_b64_flag(rest) {
                Some(pre_encode) => Command::COMPARE {
                    digest: digest.to_string(),
                    candidate: candidate.to_string(),
                    pre_encode,
                },
                None => Command::UNKNOWN,
            },
            _ => Command::UNKNOWN,
        },
        "STORE" => match args {
            [name, digest] => Command::STORE {
                name: name.to_string(),
                digest: digest.to_string(),
            },
            _ => Command::UNKNOWN,
        },
        "FIND" => match args {
            [name] => Command::FIND {
                name: name.to_string(),
            },
            _ => Command::UNKNOWN,
        },
        "ENROLL" => match args {
            [name, secret, rest @ ..] => match parse_options(rest) {
                Some((cost, pre_encode)) => Command::ENROLL {
                    name: name.to_string(),
                    secret: secret.to_string(),
                    cost,
                    pre_encode,
                },
                None => Command::UNKNOWN,
            },
            _ => Command::UNKNOWN,
        },
        "CHECK" => match args {
            [name, candidate, rest @ ..] => match parse_b64_flag(rest) {
                Some(pre_encode) => Command::CHECK {
                    name: name.to_string(),
                    candidate: candidate.to_string(),
                    pre_encode,
                },
                None => Command::UNKNOWN,
            },
            _ => Command::UNKNOWN,
        },
        "PING" => Command::PING,
        "QUIT" | "Q" => Command::QUIT,
        _ => Command::UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_with_defaults() {
        assert_eq!(
            parse_command("HASH secret123"),
            Command::HASH {
                secret: "secret123".to_string(),
                cost: None,
                pre_encode: false,
            }
        );
    }

    #[test]
    fn parses_hash_with_cost_and_flag_in_either_order() {
        let expected = Command::HASH {
            secret: "secret123".to_string(),
            cost: Some(10),
            pre_encode: true,
        };
        assert_eq!(parse_command("HASH secret123 10 B64"), expected);
        assert_eq!(parse_command("HASH secret123 b64 10"), expected);
    }

    #[test]
    fn parses_compare() {
        assert_eq!(
            parse_command("COMPARE $2b$10$abc secret123"),
            Command::COMPARE {
                digest: "$2b$10$abc".to_string(),
                candidate: "secret123".to_string(),
                pre_encode: false,
            }
        );
        assert_eq!(
            parse_command("compare $2b$10$abc secret123 B64"),
            Command::COMPARE {
                digest: "$2b$10$abc".to_string(),
                candidate: "secret123".to_string(),
                pre_encode: true,
            }
        );
    }

    #[test]
    fn parses_registry_commands() {
        assert_eq!(
            parse_command("STORE alice $2b$10$abc"),
            Command::STORE {
                name: "alice".to_string(),
                digest: "$2b$10$abc".to_string(),
            }
        );
        assert_eq!(
            parse_command("FIND alice"),
            Command::FIND {
                name: "alice".to_string(),
            }
        );
        assert_eq!(
            parse_command("ENROLL alice secret123 4"),
            Command::ENROLL {
                name: "alice".to_string(),
                secret: "secret123".to_string(),
                cost: Some(4),
                pre_encode: false,
            }
        );
        assert_eq!(
            parse_command("CHECK alice secret123"),
            Command::CHECK {
                name: "alice".to_string(),
                candidate: "secret123".to_string(),
                pre_encode: false,
            }
        );
    }

    #[test]
    fn misused_commands_parse_as_unknown() {
        assert_eq!(parse_command(""), Command::UNKNOWN);
        assert_eq!(parse_command("HASH"), Command::UNKNOWN);
        assert_eq!(parse_command("HASH secret notacost"), Command::UNKNOWN);
        assert_eq!(parse_command("COMPARE onlyone"), Command::UNKNOWN);
        assert_eq!(parse_command("STORE alice"), Command::UNKNOWN);
        assert_eq!(parse_command("FIND alice extra"), Command::UNKNOWN);
        assert_eq!(parse_command("NOSUCH"), Command::UNKNOWN);
    }

    #[test]
    fn debug_form_never_contains_the_secret() {
        let command = parse_command("HASH hunter2 10 B64");
        assert!(!format!("{:?}", command).contains("hunter2"));

        let command = parse_command("CHECK alice hunter2");
        let rendered = format!("{:?}", command);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("alice"));
    }
}
