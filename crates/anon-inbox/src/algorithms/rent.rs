//! # Record Pricing
//!
//! Minimum balances for each record kind under a `RentSchedule`.

use crate::domain::{
    Lamports, RentSchedule, INBOX_SPACE, SLOT_BASE_SPACE, WHITELIST_SPACE,
};

/// Balance the inbox record retains no matter what.
pub fn inbox_floor(rent: &RentSchedule) -> Lamports {
    rent.minimum_balance(INBOX_SPACE)
}

/// Deposit the admin pays to create a whitelist entry.
pub fn whitelist_deposit(rent: &RentSchedule) -> Lamports {
    rent.minimum_balance(WHITELIST_SPACE)
}

/// Reserve a slot holding `content_len` bytes needs.
pub fn slot_reserve(rent: &RentSchedule, content_len: u64) -> Lamports {
    rent.minimum_balance(SLOT_BASE_SPACE.saturating_add(content_len as usize))
}

/// Cost of growing a slot's capacity from `capacity` to `content_len` bytes.
///
/// Zero when the content already fits.
pub fn realloc_charge(rent: &RentSchedule, capacity: u64, content_len: u64) -> Lamports {
    if content_len <= capacity {
        return 0;
    }
    slot_reserve(rent, content_len).saturating_sub(slot_reserve(rent, capacity))
}
