//! Credential codec
//!
//! Turns a plaintext secret into a salted bcrypt digest and verifies candidate
//! plaintexts against previously produced digests. The codec is stateless and
//! safe to call from any number of tasks in parallel; plaintext never leaves
//! the call frame and is never logged.

pub mod digest;

pub use digest::Digest;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bcrypt::BcryptError;

use crate::error::CodecError;

/// Lowest cost factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest cost factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Bcrypt silently ignores input bytes past this limit, so the codec rejects
/// longer inputs outright instead of hashing a truncated secret.
pub const MAX_SECRET_BYTES: usize = 72;

/// Applies the caller-selected pre-encoding policy and enforces input limits.
///
/// The same policy must be used on both the hash and verify paths, otherwise
/// round trips fail. Pre-encoding is caller-chosen behavior, not a security
/// measure. The length limit applies to the encoded form, since that is what
/// bcrypt actually consumes.
fn prepare_input(secret: &str, pre_encode: bool) -> Result<String, CodecError> {
    if secret.is_empty() {
        return Err(CodecError::EmptySecret);
    }

    let input = if pre_encode {
        STANDARD.encode(secret.as_bytes())
    } else {
        secret.to_string()
    };

    if input.len() > MAX_SECRET_BYTES {
        return Err(CodecError::InputTooLong(input.len()));
    }

    Ok(input)
}

/// Hashes a secret with a per-call random salt at the given cost factor.
///
/// The resulting digest embeds algorithm, cost, and salt, so verification
/// later needs nothing but the digest itself. Two calls with identical inputs
/// produce different digests.
///
/// Fails with `InvalidCost` when `cost` is outside `MIN_COST..=MAX_COST`,
/// `EmptySecret`/`InputTooLong` on rejected input, and `Internal` when the
/// entropy source or the algorithm itself fails.
pub fn hash_secret(secret: &str, cost: u32, pre_encode: bool) -> Result<Digest, CodecError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(CodecError::InvalidCost(cost));
    }

    let input = prepare_input(secret, pre_encode)?;

    match bcrypt::hash(&input, cost) {
        Ok(encoded) => Ok(Digest::from_encoded(encoded)),
        Err(BcryptError::CostNotAllowed(cost)) => Err(CodecError::InvalidCost(cost)),
        Err(e) => Err(CodecError::Internal(e.to_string())),
    }
}

/// Verifies a candidate plaintext against a stored digest.
///
/// Returns `Ok(false)` on a well-formed mismatch; mismatch is an expected
/// outcome, not a failure. The cost and salt are taken from the digest and the
/// hash comparison is constant time.
pub fn verify_secret(digest: &Digest, candidate: &str, pre_encode: bool) -> Result<bool, CodecError> {
    let input = prepare_input(candidate, pre_encode)?;

    match bcrypt::verify(&input, digest.as_str()) {
        Ok(matched) => Ok(matched),
        // No salt generation happens on this path, so any library failure
        // means the digest's algorithm/cost/salt fields did not parse.
        Err(BcryptError::Io(e)) => Err(CodecError::Internal(e.to_string())),
        Err(_) => Err(CodecError::MalformedDigest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // MIN_COST keeps the test suite fast; correctness is cost-independent.
    const TEST_COST: u32 = MIN_COST;

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        assert_eq!(verify_secret(&digest, "secret123", false), Ok(true));
    }

    #[test]
    fn wrong_candidate_is_a_mismatch_not_an_error() {
        let digest = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        assert_eq!(verify_secret(&digest, "wrong", false), Ok(false));
    }

    #[test]
    fn same_input_hashes_to_different_digests() {
        let first = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        let second = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_cost_below_and_above_range() {
        assert_eq!(
            hash_secret("secret123", 0, false),
            Err(CodecError::InvalidCost(0))
        );
        assert_eq!(
            hash_secret("secret123", MIN_COST - 1, false),
            Err(CodecError::InvalidCost(MIN_COST - 1))
        );
        assert_eq!(
            hash_secret("secret123", MAX_COST + 1, false),
            Err(CodecError::InvalidCost(MAX_COST + 1))
        );
        assert_eq!(
            hash_secret("secret123", 100, false),
            Err(CodecError::InvalidCost(100))
        );
    }

    #[test]
    fn rejects_empty_secret() {
        assert_eq!(
            hash_secret("", TEST_COST, false),
            Err(CodecError::EmptySecret)
        );
        let digest = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        assert_eq!(
            verify_secret(&digest, "", false),
            Err(CodecError::EmptySecret)
        );
    }

    #[test]
    fn rejects_secret_over_byte_limit() {
        let long = "x".repeat(MAX_SECRET_BYTES + 1);
        assert_eq!(
            hash_secret(&long, TEST_COST, false),
            Err(CodecError::InputTooLong(MAX_SECRET_BYTES + 1))
        );

        // Exactly at the limit is fine.
        let max = "x".repeat(MAX_SECRET_BYTES);
        assert!(hash_secret(&max, TEST_COST, false).is_ok());
    }

    #[test]
    fn length_limit_applies_to_the_encoded_form() {
        // 60 plaintext bytes expand past 72 once base64-encoded.
        let secret = "x".repeat(60);
        assert!(hash_secret(&secret, TEST_COST, false).is_ok());
        assert_eq!(
            hash_secret(&secret, TEST_COST, true),
            Err(CodecError::InputTooLong(80))
        );
    }

    #[test]
    fn pre_encode_policy_must_match_on_both_paths() {
        let digest = hash_secret("secret123", TEST_COST, true).expect("hashing should succeed");
        assert_eq!(verify_secret(&digest, "secret123", true), Ok(true));
        assert_eq!(verify_secret(&digest, "secret123", false), Ok(false));

        let plain = hash_secret("secret123", TEST_COST, false).expect("hashing should succeed");
        assert_eq!(verify_secret(&plain, "secret123", true), Ok(false));
    }

    #[test]
    fn verify_rejects_malformed_digest() {
        let digest = Digest::from_encoded("not-a-digest".to_string());
        assert_eq!(
            verify_secret(&digest, "secret123", false),
            Err(CodecError::MalformedDigest)
        );
    }
}
