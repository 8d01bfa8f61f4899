//! # Domain Entities
//!
//! The three persisted record kinds (inbox, slot, whitelist entry) and the
//! inbox configuration.
//!
//! ## Record sizes
//!
//! Sizes mirror the on-chain account layout the rent schedule is applied to:
//!
//! | Record | Layout | Bytes |
//! |--------|--------|-------|
//! | Inbox | discriminator + admin + two counters | 56 |
//! | WhitelistEntry | discriminator only | 8 |
//! | Slot | discriminator + recipient + length prefix + content | 44 + len |

use super::value_objects::RentSchedule;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Balance unit.
pub type Lamports = u64;

/// Slot index handed out by the allocation counters.
pub type SlotIndex = u64;

/// Derived 32-byte record address.
pub type Address = [u8; 32];

/// Account discriminator prefix carried by every record.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Inbox record size: discriminator, admin key, `next_free_slot`, `next_whitelisted_slot`.
pub const INBOX_SPACE: usize = DISCRIMINATOR_LEN + 32 + 8 + 8;

/// Whitelist entries carry no payload; the record's existence is the membership.
pub const WHITELIST_SPACE: usize = DISCRIMINATOR_LEN;

/// Slot size before content: discriminator, recipient key, 4-byte length prefix.
pub const SLOT_BASE_SPACE: usize = DISCRIMINATOR_LEN + 32 + 4;

/// Largest single record allocation.
pub const MAX_RECORD_SPACE: usize = 10_240;

/// Opaque principal: an ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wrap raw public key bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({}..)", hex::encode(&self.0[..4]))
    }
}

/// The singleton inbox record.
///
/// INVARIANT: `next_whitelisted_slot <= next_free_slot`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbox {
    /// Identity allowed to run admin operations.
    pub admin: Identity,
    /// Next index the paying path will create.
    pub next_free_slot: SlotIndex,
    /// Next index the whitelisted path will reuse.
    pub next_whitelisted_slot: SlotIndex,
    /// Lamports held by the inbox, including every slot's reserve.
    pub held_balance: Lamports,
}

impl Inbox {
    /// Fresh inbox with zeroed counters.
    pub fn new(admin: Identity, held_balance: Lamports) -> Self {
        Self {
            admin,
            next_free_slot: 0,
            next_whitelisted_slot: 0,
            held_balance,
        }
    }

    /// True while paid slots remain that no whitelisted sender has consumed.
    pub fn has_prepaid_slot(&self) -> bool {
        self.next_whitelisted_slot < self.next_free_slot
    }

    /// Number of paid, unconsumed slots.
    pub fn prepaid_slots(&self) -> u64 {
        self.next_free_slot.saturating_sub(self.next_whitelisted_slot)
    }
}

/// A message slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Recipient of the current message.
    pub recipient: Identity,
    /// Opaque message bytes.
    pub content: Vec<u8>,
    /// Content bytes senders have paid storage for. Grow-only.
    pub capacity: u64,
    /// Portion of the inbox balance earmarked for this slot's current content.
    pub reserved_balance: Lamports,
}

impl Slot {
    /// Record size needed for the current content.
    pub fn space(&self) -> usize {
        SLOT_BASE_SPACE + self.content.len()
    }

    /// Content length as `u64`.
    pub fn content_len(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Whitelist membership record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    /// Member identity.
    pub identity: Identity,
    /// Lamports the admin deposited to create the record.
    pub rent_deposit: Lamports,
}

/// Inbox configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Maximum number of slots the paying path may create.
    pub max_slots: u64,
    /// Maximum content length of a single message.
    pub max_content_len: usize,
    /// Events retained by the service before the oldest are dropped.
    pub max_event_log: usize,
    /// Rent schedule used to price records.
    pub rent: RentSchedule,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            max_slots: 10,
            max_content_len: MAX_RECORD_SPACE - SLOT_BASE_SPACE,
            max_event_log: 1024,
            rent: RentSchedule::default(),
        }
    }
}

impl InboxConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `INBOX_MAX_SLOTS`: Maximum slot count (default: 10)
    /// - `INBOX_MAX_CONTENT_LEN`: Maximum message length (default: 10196)
    /// - `INBOX_MAX_EVENT_LOG`: Retained events (default: 1024)
    /// - `INBOX_LAMPORTS_PER_BYTE_YEAR`: Rent rate (default: 3480)
    /// - `INBOX_EXEMPTION_THRESHOLD`: Rent-exempt multiplier (default: 2)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_slots: parse_env("INBOX_MAX_SLOTS").unwrap_or(defaults.max_slots),
            max_content_len: parse_env("INBOX_MAX_CONTENT_LEN")
                .unwrap_or(defaults.max_content_len),
            max_event_log: parse_env("INBOX_MAX_EVENT_LOG").unwrap_or(defaults.max_event_log),
            rent: RentSchedule {
                lamports_per_byte_year: parse_env("INBOX_LAMPORTS_PER_BYTE_YEAR")
                    .unwrap_or(defaults.rent.lamports_per_byte_year),
                exemption_threshold: parse_env("INBOX_EXEMPTION_THRESHOLD")
                    .unwrap_or(defaults.rent.exemption_threshold),
                ..defaults.rent
            },
        }
    }

    /// Builder method to set the slot limit.
    pub fn with_max_slots(mut self, max_slots: u64) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// Builder method to set the rent schedule.
    pub fn with_rent(mut self, rent: RentSchedule) -> Self {
        self.rent = rent;
        self
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
