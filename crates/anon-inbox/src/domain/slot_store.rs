//! # Slot Store
//!
//! Slot records keyed by index. The store only holds records; which index is
//! written, and what it costs, is decided by the allocation engine.

use super::entities::{Lamports, Slot, SlotIndex};
use std::collections::BTreeMap;

/// Index → slot mapping, ordered so iteration follows allocation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotStore {
    slots: BTreeMap<SlotIndex, Slot>,
    /// Running sum of `reserved_balance` over `slots`.
    reserved: Lamports,
}

impl SlotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live slot records.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is live.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Gets a slot by index.
    pub fn get(&self, index: SlotIndex) -> Option<&Slot> {
        self.slots.get(&index)
    }

    /// Checks whether a slot record exists at `index`.
    pub fn contains(&self, index: SlotIndex) -> bool {
        self.slots.contains_key(&index)
    }

    /// Writes the slot at `index`, replacing any previous record.
    pub fn put(&mut self, index: SlotIndex, slot: Slot) -> Option<Slot> {
        self.reserved = self.reserved.saturating_add(slot.reserved_balance);
        let previous = self.slots.insert(index, slot);
        if let Some(old) = &previous {
            self.reserved = self.reserved.saturating_sub(old.reserved_balance);
        }
        previous
    }

    /// Destroys the slot at `index`.
    pub fn remove(&mut self, index: SlotIndex) -> Option<Slot> {
        let removed = self.slots.remove(&index);
        if let Some(old) = &removed {
            self.reserved = self.reserved.saturating_sub(old.reserved_balance);
        }
        removed
    }

    /// Sum of all slot reserves.
    pub fn total_reserved(&self) -> Lamports {
        self.reserved
    }

    /// Recomputes the reserve sum from the records.
    pub fn recount_reserved(&self) -> Lamports {
        self.slots
            .values()
            .fold(0u64, |acc, slot| acc.saturating_add(slot.reserved_balance))
    }

    /// Highest live index, if any.
    pub fn highest_index(&self) -> Option<SlotIndex> {
        self.slots.keys().next_back().copied()
    }

    /// Iterates slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &Slot)> {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }
}
