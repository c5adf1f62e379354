//! Identity registry
//!
//! Concurrency-safe in-memory mapping from identity name to stored record.
//! Records live for the process lifetime; there is no delete operation.

pub mod identity;

pub use identity::Identity;

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::codec::Digest;
use crate::error::RegistryError;

/// Shared registry of identity records.
///
/// A single mutex guards the whole map. Every operation takes the lock, does
/// its map work, and releases it; nothing under the lock blocks on I/O or
/// hashes. Callers must hash before calling `store`, never while holding a
/// record.
pub struct IdentityRegistry {
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    next_id: u64,
    records: HashMap<String, Identity>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next_id: 0,
                records: HashMap::new(),
            }),
        }
    }

    /// Stores a digest under a name.
    ///
    /// Creates a new record with a fresh identifier when the name is unseen;
    /// otherwise overwrites the existing record's digest in place (last write
    /// wins, identifier preserved). Returns the record as stored.
    pub fn store(&self, name: &str, digest: Digest) -> Result<Identity, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut inner = self.inner.lock();

        match inner.records.get_mut(name) {
            Some(existing) => {
                existing.set_digest(digest);
                Ok(existing.clone())
            }
            None => {
                inner.next_id += 1;
                let identity = Identity::new(inner.next_id, name.to_string(), digest);
                inner.records.insert(name.to_string(), identity.clone());
                Ok(identity)
            }
        }
    }

    /// Looks up the current record for a name.
    ///
    /// Reflects the most recently completed `store` for that name. Fails with
    /// `NotFound` when the name was never stored.
    pub fn find(&self, name: &str) -> Result<Identity, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        self.inner
            .lock()
            .records
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Returns the number of stored identities
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
