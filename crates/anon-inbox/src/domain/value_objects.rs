//! # Domain Value Objects
//!
//! Immutable values passed between the allocation engine, the ledger and
//! callers.

use super::entities::{Address, Identity, Lamports, SlotIndex};
use serde::{Deserialize, Serialize};

/// Rent-exemption pricing for records.
///
/// `minimum_balance(space) = (storage_overhead + space) * lamports_per_byte_year * exemption_threshold`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentSchedule {
    /// Rent rate per byte per year.
    pub lamports_per_byte_year: u64,
    /// Years of rent a record must hold to be exempt.
    pub exemption_threshold: u64,
    /// Bytes of bookkeeping charged on top of every record.
    pub storage_overhead: u64,
}

impl Default for RentSchedule {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3_480,
            exemption_threshold: 2,
            storage_overhead: 128,
        }
    }
}

impl RentSchedule {
    /// Lamports a record of `space` bytes must hold to stay alive.
    pub fn minimum_balance(&self, space: usize) -> Lamports {
        (self.storage_overhead.saturating_add(space as u64))
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_threshold)
    }
}

/// Which admission path a message took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SendPath {
    /// Sender paid for a fresh slot at `next_free_slot`.
    Paying,
    /// Whitelisted sender reused a prepaid slot at `next_whitelisted_slot`.
    Whitelisted,
}

/// Slot state machine transition applied by a send.
///
/// ```text
/// [Empty] ──create──→ [Occupied] ──overwrite-fits──→ [Occupied]
///                         │  └──────overwrite-grow──→ [Occupied]
///                         └──reclaim (admin)──→ [Empty]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotTransition {
    /// Empty slot created; full reserve paid.
    Create,
    /// Occupied slot overwritten within its capacity.
    OverwriteFits,
    /// Occupied slot overwritten beyond its capacity; growth paid.
    OverwriteGrow,
}

/// Outcome of a successful send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Slot the message landed in.
    pub index: SlotIndex,
    /// Derived address of that slot.
    pub slot_address: Address,
    /// Admission path.
    pub path: SendPath,
    /// Transition applied to the slot.
    pub transition: SlotTransition,
    /// Lamports taken from the sender.
    pub charged: Lamports,
    /// Lamports of slot reserve released to the inbox free balance.
    pub released: Lamports,
    /// Lamports of inbox free balance moved into the slot reserve.
    pub from_inbox: Lamports,
}

/// Outcome of a slot reclaim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclaimReceipt {
    /// Reclaimed index.
    pub index: SlotIndex,
    /// Reserve returned to the inbox free balance.
    pub released: Lamports,
}

/// Outcome of a whitelist addition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistReceipt {
    /// Member identity.
    pub identity: Identity,
    /// False when the entry already existed and nothing changed.
    pub created: bool,
    /// Lamports moved between the admin and the entry.
    pub deposit: Lamports,
}

/// Point-in-time summary of the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxStatus {
    /// Whether `initialize` has run.
    pub initialized: bool,
    /// Current admin.
    pub admin: Option<Identity>,
    /// `next_free_slot` counter.
    pub next_free_slot: SlotIndex,
    /// `next_whitelisted_slot` counter.
    pub next_whitelisted_slot: SlotIndex,
    /// Live slot records.
    pub live_slots: usize,
    /// Whitelist members.
    pub whitelisted: usize,
    /// Inbox held balance.
    pub held_balance: Lamports,
    /// Sum of slot reserves.
    pub reserved_balance: Lamports,
    /// Withdrawable surplus.
    pub free_balance: Lamports,
}
