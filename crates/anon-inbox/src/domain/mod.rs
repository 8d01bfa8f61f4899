//! # Domain Layer
//!
//! Records, registries and accounting rules of the inbox. Pure data and
//! validation; no I/O, no locking.
//!
//! ## Components
//!
//! - `entities`: `Inbox`, `Slot`, `WhitelistEntry`, `InboxConfig`, record sizes
//! - `value_objects`: `RentSchedule`, `SendPath`, receipts, `InboxStatus`
//! - `slot_store`: index → slot mapping with a running reserve sum
//! - `whitelist`: identity → membership table
//! - `balances`: external wallet balances and surplus arithmetic
//! - `addressing`: deterministic record addresses
//! - `invariants`: accounting rules checked after every operation
//! - `errors`: `InboxError`

pub mod addressing;
pub mod balances;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod slot_store;
pub mod value_objects;
pub mod whitelist;

pub use addressing::*;
pub use balances::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use slot_store::*;
pub use value_objects::*;
pub use whitelist::*;
