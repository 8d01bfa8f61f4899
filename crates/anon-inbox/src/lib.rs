//! # Anonymous Inbox
//!
//! Whitelist-gated message inbox with slot allocation and rent accounting.
//!
//! ## Purpose
//!
//! Anyone can drop a message for a recipient by paying for a storage slot.
//! Whitelisted senders skip the payment by overwriting slots other senders
//! already paid for. An admin curates the whitelist, reclaims slots and
//! withdraws the balance the inbox accumulates above what it must retain.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | `next_whitelisted_slot <= next_free_slot` | `algorithms/allocation.rs` - `plan_whitelisted_send()` |
//! | Slot exists only below `next_free_slot` | `ledger.rs` - `commit_send()` |
//! | Inbox never drops below floor + reserves | `ledger.rs` - `withdraw_surplus()` |
//! | Slot capacity never shrinks | `algorithms/allocation.rs` - `new_capacity` |
//! | Lamports conserved | `ledger.rs` - plan-then-apply |
//!
//! ## Two Counters
//!
//! ```text
//!   slot:      0     1     2     3     4
//!            [ W ] [ W ] [ P ] [ P ] [   ]
//!                        ↑           ↑
//!          next_whitelisted_slot   next_free_slot
//!
//! P = paid, awaiting reuse     W = overwritten by a whitelisted sender
//! ```
//!
//! ## Security
//!
//! - **Signed requests**: `ipc::RequestHandler` verifies an ed25519 signature
//!   over the bincode-encoded request before dispatch
//! - **Replay prevention**: per-signer strictly increasing nonces
//! - **Admin gate**: every admin operation checks the caller against `Inbox::admin`
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  ipc/      - SignedRequest, RequestHandler                      │
//! │  adapters/ - Ed25519SignatureVerifier                           │
//! │  service   - InboxService (RwLock sequencer, event log)         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - InboxApi trait                             │
//! │  ports/outbound.rs - SignatureVerifier trait                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  ledger.rs               - LedgerState, plan-then-apply ops     │
//! │  algorithms/allocation.rs - paying / whitelisted slot planning  │
//! │  algorithms/rent.rs      - record pricing                       │
//! │  domain/                 - records, registries, invariants      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod events;
pub mod ipc;
pub mod ledger;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use events::InboxEvent;
pub use ipc::*;
pub use ledger::LedgerState;
pub use ports::*;
pub use service::{InboxService, ServiceStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
