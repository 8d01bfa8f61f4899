//! # Whitelist Registry
//!
//! Capability table keyed by identity. Membership is the existence of an
//! entry; lookups are O(1).

use super::entities::{Identity, Lamports, WhitelistEntry};
use std::collections::HashMap;

/// Identity → whitelist entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WhitelistRegistry {
    entries: HashMap<Identity, WhitelistEntry>,
}

impl WhitelistRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Gets an entry.
    pub fn get(&self, identity: &Identity) -> Option<&WhitelistEntry> {
        self.entries.get(identity)
    }

    /// Inserts an entry unless one exists. Returns true if it was created.
    pub fn insert(&mut self, identity: Identity, rent_deposit: Lamports) -> bool {
        if self.entries.contains_key(&identity) {
            return false;
        }
        self.entries.insert(
            identity,
            WhitelistEntry {
                identity,
                rent_deposit,
            },
        );
        true
    }

    /// Destroys an entry, returning it.
    pub fn remove(&mut self, identity: &Identity) -> Option<WhitelistEntry> {
        self.entries.remove(identity)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of deposits held by entries.
    pub fn total_deposits(&self) -> Lamports {
        self.entries
            .values()
            .fold(0u64, |acc, e| acc.saturating_add(e.rent_deposit))
    }
}
