//! Deterministic record addresses.
//!
//! Every record is addressable by a pure function of its key: the inbox by a
//! fixed seed, a slot by its index, a whitelist entry by the member identity.

use super::entities::{Address, Identity, SlotIndex};
use sha2::{Digest, Sha256};

/// Namespace mixed into every derivation.
pub const PROGRAM_NAMESPACE: &[u8] = b"anon-inbox/v1";

/// Seed of the singleton inbox record.
pub const INBOX_SEED: &[u8] = b"inbox";

/// Hash the namespace and seeds into an address.
pub fn derive_address(seeds: &[&[u8]]) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(PROGRAM_NAMESPACE);
    for seed in seeds {
        hasher.update((seed.len() as u32).to_le_bytes());
        hasher.update(seed);
    }
    hasher.finalize().into()
}

/// Address of the inbox record.
pub fn inbox_address() -> Address {
    derive_address(&[INBOX_SEED])
}

/// Address of the slot at `index`.
pub fn slot_address(index: SlotIndex) -> Address {
    derive_address(&[&index.to_le_bytes()])
}

/// Address of `identity`'s whitelist entry.
pub fn whitelist_address(identity: &Identity) -> Address {
    derive_address(&[identity.as_bytes()])
}
