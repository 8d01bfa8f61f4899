//! # Domain Invariants
//!
//! Accounting rules that hold after every completed operation.
//!
//! | Invariant | Rule |
//! |-----------|------|
//! | Counter ordering | `next_whitelisted_slot <= next_free_slot` |
//! | Slot bounds | every live slot index is `< next_free_slot` |
//! | Solvency | `held_balance >= inbox floor + sum of slot reserves` |
//! | Capacity | every slot's content fits its capacity, reserve matches content |

use super::entities::{Inbox, Lamports, SLOT_BASE_SPACE};
use super::slot_store::SlotStore;
use super::value_objects::RentSchedule;

/// Whitelisted reuse can never outrun paid allocation.
pub fn invariant_counter_ordering(inbox: &Inbox) -> bool {
    inbox.next_whitelisted_slot <= inbox.next_free_slot
}

/// No slot lives at or beyond `next_free_slot`.
pub fn invariant_slot_bounds(inbox: &Inbox, slots: &SlotStore) -> bool {
    slots
        .highest_index()
        .map_or(true, |index| index < inbox.next_free_slot)
}

/// The inbox can keep itself and every slot alive.
pub fn invariant_solvency(inbox: &Inbox, slots: &SlotStore, floor: Lamports) -> bool {
    floor
        .checked_add(slots.total_reserved())
        .map_or(false, |required| inbox.held_balance >= required)
}

/// Content never exceeds capacity and each reserve prices exactly the content.
pub fn invariant_slot_capacity(slots: &SlotStore, rent: &RentSchedule) -> bool {
    slots.iter().all(|(_, slot)| {
        slot.content_len() <= slot.capacity
            && slot.reserved_balance == rent.minimum_balance(SLOT_BASE_SPACE + slot.content.len())
    })
}

/// Names of every violated invariant; empty when the state is consistent.
pub fn check_all(
    inbox: &Inbox,
    slots: &SlotStore,
    floor: Lamports,
    rent: &RentSchedule,
) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if !invariant_counter_ordering(inbox) {
        violations.push("counter_ordering");
    }
    if !invariant_slot_bounds(inbox, slots) {
        violations.push("slot_bounds");
    }
    if !invariant_solvency(inbox, slots, floor) {
        violations.push("solvency");
    }
    if slots.total_reserved() != slots.recount_reserved() {
        violations.push("reserve_sum");
    }
    if !invariant_slot_capacity(slots, rent) {
        violations.push("slot_capacity");
    }
    violations
}
