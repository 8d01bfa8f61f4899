//! # Algorithms Module
//!
//! Record pricing and the slot allocation decision.

pub mod allocation;
pub mod rent;

pub use allocation::{
    plan_paying_send, plan_whitelisted_send, validate_content_len, AllocationPlan,
};
pub use rent::{inbox_floor, realloc_charge, slot_reserve, whitelist_deposit};
