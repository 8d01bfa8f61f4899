//! # Domain Errors
//!
//! Every failure the inbox can report. All of them are detected while the
//! allocation plan is being built, before any state is touched.

use super::entities::{Identity, Lamports, SlotIndex};
use thiserror::Error;

/// Inbox error types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InboxError {
    /// Admin-only operation attempted by someone else.
    #[error("Not admin: {caller}")]
    NotAdmin {
        /// Identity that attempted the operation.
        caller: Identity,
    },

    /// Identity has no whitelist entry.
    #[error("Not whitelisted: {0}")]
    NotWhitelisted(Identity),

    /// Whitelisted send with no pre-paid, unconsumed slot.
    #[error("No slot available: next whitelisted slot {next_whitelisted} has caught up with next free slot")]
    NoSlotAvailable {
        /// Current value of both counters.
        next_whitelisted: SlotIndex,
    },

    /// Paying send beyond the configured slot count.
    #[error("Inbox full: {max_slots} slots allocated")]
    InboxFull {
        /// Configured maximum.
        max_slots: u64,
    },

    /// Slot was never allocated or has been reclaimed.
    #[error("Slot not found: {0}")]
    SlotNotFound(SlotIndex),

    /// Payer cannot cover the charge.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Lamports the operation needs from the payer.
        required: Lamports,
        /// Lamports the payer holds.
        available: Lamports,
    },

    /// Inbox holds nothing above its retention floor.
    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    /// Signature does not match the claimed identity.
    #[error("Unauthenticated request from {0}")]
    Unauthenticated(Identity),

    /// Operation requires an initialized inbox.
    #[error("Inbox not initialized")]
    NotInitialized,

    /// Signed request nonce not above the signer's last accepted nonce.
    #[error("Replayed request: nonce {nonce}, last accepted {last}")]
    ReplayedRequest {
        /// Nonce carried by the request.
        nonce: u64,
        /// Highest nonce accepted so far from the signer.
        last: u64,
    },

    /// `initialize` called twice.
    #[error("Inbox already initialized")]
    AlreadyInitialized,

    /// Content exceeds the per-slot limit.
    #[error("Message too long: {len} bytes, max {max}")]
    MessageTooLong {
        /// Content length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Counter or balance arithmetic overflowed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Request payload could not be encoded for signing.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InboxError {
    /// Short, stable name used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAdmin { .. } => "not_admin",
            Self::NotWhitelisted(_) => "not_whitelisted",
            Self::NoSlotAvailable { .. } => "no_slot_available",
            Self::InboxFull { .. } => "inbox_full",
            Self::SlotNotFound(_) => "slot_not_found",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::NothingToWithdraw => "nothing_to_withdraw",
            Self::Unauthenticated(_) => "unauthenticated",
            Self::ReplayedRequest { .. } => "replayed_request",
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::MessageTooLong { .. } => "message_too_long",
            Self::ArithmeticOverflow => "arithmetic_overflow",
            Self::Serialization(_) => "serialization",
        }
    }
}
