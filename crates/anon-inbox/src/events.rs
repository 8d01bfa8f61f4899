//! # Inbox Events
//!
//! One event per committed state transition, in commit order.

use crate::domain::{Address, Identity, Lamports, SendPath, SlotIndex, SlotTransition};
use serde::{Deserialize, Serialize};

/// Committed inbox state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxEvent {
    /// Inbox created.
    InboxInitialized {
        /// Initial admin.
        admin: Identity,
        /// Lamports the admin paid into the inbox.
        floor: Lamports,
    },
    /// Admin handed over.
    AdminChanged {
        previous: Identity,
        new_admin: Identity,
    },
    /// Whitelist entry created.
    WhitelistAdded {
        identity: Identity,
        deposit: Lamports,
    },
    /// Whitelist entry destroyed; deposit refunded to the admin.
    WhitelistRemoved {
        identity: Identity,
        refund: Lamports,
    },
    /// Message written into a slot.
    MessageSent {
        index: SlotIndex,
        slot_address: Address,
        path: SendPath,
        transition: SlotTransition,
        recipient: Identity,
        charged: Lamports,
        released: Lamports,
        from_inbox: Lamports,
    },
    /// Slot destroyed by the admin.
    SlotReclaimed {
        index: SlotIndex,
        released: Lamports,
    },
    /// Surplus moved to the admin wallet.
    SurplusWithdrawn {
        admin: Identity,
        amount: Lamports,
    },
}

impl InboxEvent {
    /// Event name used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InboxInitialized { .. } => "inbox_initialized",
            Self::AdminChanged { .. } => "admin_changed",
            Self::WhitelistAdded { .. } => "whitelist_added",
            Self::WhitelistRemoved { .. } => "whitelist_removed",
            Self::MessageSent { .. } => "message_sent",
            Self::SlotReclaimed { .. } => "slot_reclaimed",
            Self::SurplusWithdrawn { .. } => "surplus_withdrawn",
        }
    }
}
