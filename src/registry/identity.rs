//! Module `identity`
//!
//! Defines the `Identity` record: a named slot in the registry holding one
//! stored digest plus its registry-assigned identifier.

use crate::codec::Digest;

/// A named record holding one stored credential digest.
///
/// The identifier is assigned by the registry when the name is first stored
/// and never changes afterwards; the name is immutable once created. Only the
/// digest is replaced on overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: u64,
    name: String,
    digest: Digest,
}

impl Identity {
    pub(crate) fn new(id: u64, name: String, digest: Digest) -> Self {
        Self { id, name, digest }
    }

    /// Returns the registry-assigned unique identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the identity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the currently stored digest
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Replaces the stored digest (last write wins)
    pub(crate) fn set_digest(&mut self, digest: Digest) {
        self.digest = digest;
    }
}
