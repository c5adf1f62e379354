//! Module `digest`
//!
//! Defines the `Digest` type: the opaque, self-describing output of the codec.
//! A digest is a printable bcrypt string of the form `$2b$cc$<salt><hash>`,
//! embedding the algorithm version, cost factor, and salt, so it can be
//! verified without any external state.

use std::fmt;

use crate::codec::{MAX_COST, MIN_COST};
use crate::error::CodecError;

/// Bytes after the second `$`-separator: 22 salt characters + 31 hash characters
const PAYLOAD_LEN: usize = 53;

/// An opaque credential digest
///
/// Construct one with [`crate::codec::hash_secret`], or with [`Digest::parse`]
/// when reading an externally supplied digest string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(String);

impl Digest {
    /// Wraps a string the codec itself produced. Performs no validation.
    pub(crate) fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// Parses an externally supplied digest string, checking the bcrypt
    /// structure: version marker, two-digit cost in range, and payload length.
    ///
    /// Fails with `MalformedDigest` on anything that does not look like a
    /// bcrypt digest.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let fields: Vec<&str> = s.split('$').collect();

        // "$2b$10$<payload>" splits into ["", "2b", "10", payload]
        if fields.len() != 4 || !fields[0].is_empty() {
            return Err(CodecError::MalformedDigest);
        }

        if !matches!(fields[1], "2a" | "2b" | "2x" | "2y") {
            return Err(CodecError::MalformedDigest);
        }

        if fields[2].len() != 2 {
            return Err(CodecError::MalformedDigest);
        }
        let cost: u32 = fields[2].parse().map_err(|_| CodecError::MalformedDigest)?;
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CodecError::MalformedDigest);
        }

        if fields[3].len() != PAYLOAD_LEN {
            return Err(CodecError::MalformedDigest);
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the cost factor embedded in the digest
    pub fn cost(&self) -> Option<u32> {
        self.0.split('$').nth(2)?.parse().ok()
    }

    /// Returns the digest as its printable string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hash_secret;

    #[test]
    fn parses_a_real_digest() {
        let digest = hash_secret("secret123", MIN_COST, false).expect("hashing should succeed");
        let reparsed = Digest::parse(digest.as_str()).expect("codec output should parse");
        assert_eq!(reparsed, digest);
    }

    #[test]
    fn embeds_the_cost_factor() {
        let digest = hash_secret("secret123", 6, false).expect("hashing should succeed");
        assert_eq!(digest.cost(), Some(6));
    }

    #[test]
    fn rejects_garbage() {
        for input in [
            "",
            "not-a-digest",
            "$2b$10",
            "$2b$10$short",
            "$9z$10$eImiTXuWVxfM37uY4JANjQ3e3bzYoWI6Rr6rEIWrz5FyXAIJFG3ue",
            "$2b$xx$eImiTXuWVxfM37uY4JANjQ3e3bzYoWI6Rr6rEIWrz5FyXAIJFG3ue",
            "$2b$99$eImiTXuWVxfM37uY4JANjQ3e3bzYoWI6Rr6rEIWrz5FyXAIJFG3ue",
            "x$2b$10$eImiTXuWVxfM37uY4JANjQ3e3bzYoWI6Rr6rEIWrz5FyXAIJFG3u",
        ] {
            assert_eq!(
                Digest::parse(input),
                Err(CodecError::MalformedDigest),
                "should reject {:?}",
                input
            );
        }
    }
}
