//! # Slot Allocation
//!
//! Decides, for one incoming message, which slot it lands in and how the
//! slot's reserve is funded. Planning is pure: it reads the inbox, the target
//! slot and the inbox free balance, and returns an [`AllocationPlan`] that the
//! ledger applies without any further checks that could fail.
//!
//! ## Paying path
//!
//! Target is `next_free_slot`. The sender funds the whole reserve of a new
//! slot (or only the growth above an existing record's reserve).
//!
//! ## Whitelisted path
//!
//! Target is `next_whitelisted_slot`, which must be below `next_free_slot`.
//!
//! | Content vs capacity | Sender pays | Reserve change |
//! |---------------------|-------------|----------------|
//! | shorter than current | nothing | excess released to inbox |
//! | fits capacity | nothing | top-up drawn from inbox free balance |
//! | exceeds capacity | capacity growth | capacity grows permanently |
//!
//! Any top-up the inbox free balance cannot cover is charged to the sender.
//!
//! ## Reachability
//!
//! Through the ledger's operations a slot is written once by the paying path
//! and at most once by the whitelisted path, so when a whitelisted send reuses
//! it the reserve still equals the price of its capacity. The top-up is then
//! exactly the capacity growth and `from_inbox` is always zero. The inbox
//! top-up and the paying-path overwrite only apply to records whose reserve
//! was set some other way (a store seeded from outside the ledger).

use super::rent::{realloc_charge, slot_reserve};
use crate::domain::{
    Inbox, InboxConfig, InboxError, Lamports, SendPath, Slot, SlotIndex, SlotTransition,
};

/// Fully-priced decision for one send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocationPlan {
    /// Target slot.
    pub index: SlotIndex,
    /// Admission path.
    pub path: SendPath,
    /// Slot transition.
    pub transition: SlotTransition,
    /// Lamports moved from the sender into the inbox.
    pub sender_charge: Lamports,
    /// Inbox free balance moved into the slot reserve.
    pub from_inbox: Lamports,
    /// Slot reserve released to the inbox free balance.
    pub released: Lamports,
    /// Reserve the slot holds afterwards.
    pub new_reserve: Lamports,
    /// Capacity the slot holds afterwards.
    pub new_capacity: u64,
}

/// Rejects content longer than the configured limit.
pub fn validate_content_len(config: &InboxConfig, len: usize) -> Result<(), InboxError> {
    if len > config.max_content_len {
        return Err(InboxError::MessageTooLong {
            len,
            max: config.max_content_len,
        });
    }
    Ok(())
}

/// Plans a paying-path send into `next_free_slot`.
///
/// `existing` is the record already stored at that index, if any.
pub fn plan_paying_send(
    inbox: &Inbox,
    existing: Option<&Slot>,
    config: &InboxConfig,
    content_len: u64,
) -> Result<AllocationPlan, InboxError> {
    if inbox.next_free_slot >= config.max_slots {
        return Err(InboxError::InboxFull {
            max_slots: config.max_slots,
        });
    }

    let required = slot_reserve(&config.rent, content_len);
    let index = inbox.next_free_slot;

    let plan = match existing {
        None => AllocationPlan {
            index,
            path: SendPath::Paying,
            transition: SlotTransition::Create,
            sender_charge: required,
            from_inbox: 0,
            released: 0,
            new_reserve: required,
            new_capacity: content_len,
        },
        Some(slot) => AllocationPlan {
            index,
            path: SendPath::Paying,
            transition: overwrite_transition(slot, content_len),
            sender_charge: required.saturating_sub(slot.reserved_balance),
            from_inbox: 0,
            released: slot.reserved_balance.saturating_sub(required),
            new_reserve: required,
            new_capacity: slot.capacity.max(content_len),
        },
    };

    Ok(plan)
}

/// Plans a whitelisted send into `next_whitelisted_slot`.
///
/// `existing` is the record at that index (absent if it was reclaimed);
/// `inbox_free` is the inbox balance above its floor and all reserves.
pub fn plan_whitelisted_send(
    inbox: &Inbox,
    existing: Option<&Slot>,
    inbox_free: Lamports,
    config: &InboxConfig,
    content_len: u64,
) -> Result<AllocationPlan, InboxError> {
    if !inbox.has_prepaid_slot() {
        return Err(InboxError::NoSlotAvailable {
            next_whitelisted: inbox.next_whitelisted_slot,
        });
    }

    let required = slot_reserve(&config.rent, content_len);
    let index = inbox.next_whitelisted_slot;

    let Some(slot) = existing else {
        // Reclaimed slot: re-created at the sender's expense.
        return Ok(AllocationPlan {
            index,
            path: SendPath::Whitelisted,
            transition: SlotTransition::Create,
            sender_charge: required,
            from_inbox: 0,
            released: 0,
            new_reserve: required,
            new_capacity: content_len,
        });
    };

    let transition = overwrite_transition(slot, content_len);
    let current = slot.reserved_balance;

    let (sender_charge, from_inbox, released) = if required >= current {
        let top_up = required - current;
        let growth = realloc_charge(&config.rent, slot.capacity, content_len).min(top_up);
        let inbox_share = top_up - growth;
        let from_inbox = inbox_share.min(inbox_free);
        let shortfall = inbox_share - from_inbox;
        (growth + shortfall, from_inbox, 0)
    } else {
        (0, 0, current - required)
    };

    Ok(AllocationPlan {
        index,
        path: SendPath::Whitelisted,
        transition,
        sender_charge,
        from_inbox,
        released,
        new_reserve: required,
        new_capacity: slot.capacity.max(content_len),
    })
}

fn overwrite_transition(slot: &Slot, content_len: u64) -> SlotTransition {
    if content_len > slot.capacity {
        SlotTransition::OverwriteGrow
    } else {
        SlotTransition::OverwriteFits
    }
}
