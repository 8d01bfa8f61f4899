//! # Inbound Port - InboxApi
//!
//! Primary driving port. Every method takes an identity that has already
//! been authenticated by the caller (see `ipc::RequestHandler`).
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `initialize` | anyone (becomes admin) |
//! | `change_admin` | admin |
//! | `add_to_whitelist` | admin |
//! | `remove_from_whitelist` | admin |
//! | `send_message` | anyone |
//! | `send_regular_message` | anyone |
//! | `send_whitelisted_message` | whitelisted identities |
//! | `reclaim_slot` | admin |
//! | `withdraw_surplus_inbox_balance` | admin |

use crate::domain::{
    Identity, Inbox, InboxError, InboxStatus, Lamports, ReclaimReceipt, SendReceipt, Slot,
    SlotIndex, WhitelistReceipt,
};

/// Primary API of the inbox.
///
/// # Example
///
/// ```rust,ignore
/// use anon_inbox::ports::InboxApi;
///
/// fn example(inbox: &impl InboxApi, admin: Identity, alice: Identity) {
///     inbox.initialize(admin)?;
///     inbox.add_to_whitelist(admin, alice)?;
///     let receipt = inbox.send_message(alice, admin, b"hi".to_vec())?;
/// }
/// ```
pub trait InboxApi: Send + Sync {
    /// Creates the inbox; `initializer` becomes admin and pays the floor.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: inbox exists
    /// - `InsufficientBalance`: initializer cannot cover the floor
    fn initialize(&self, initializer: Identity) -> Result<Lamports, InboxError>;

    /// Replaces the admin. Returns the previous one.
    fn change_admin(&self, caller: Identity, new_admin: Identity) -> Result<Identity, InboxError>;

    /// Creates a whitelist entry, paid by the admin. Idempotent.
    fn add_to_whitelist(
        &self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError>;

    /// Destroys a whitelist entry and refunds its deposit to the admin.
    ///
    /// # Errors
    /// - `NotWhitelisted`: no entry for `identity`
    fn remove_from_whitelist(
        &self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError>;

    /// Dispatches on whitelist membership of `sender`.
    fn send_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError>;

    /// Paying path: a new slot at `next_free_slot`.
    ///
    /// # Errors
    /// - `InboxFull`: slot limit reached
    /// - `InsufficientBalance`: sender cannot cover the reserve
    fn send_regular_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError>;

    /// Whitelisted path: reuses the slot at `next_whitelisted_slot`.
    ///
    /// # Errors
    /// - `NotWhitelisted`: sender has no entry
    /// - `NoSlotAvailable`: no prepaid slot left
    fn send_whitelisted_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError>;

    /// Destroys a slot; its reserve joins the inbox free balance.
    fn reclaim_slot(&self, caller: Identity, index: SlotIndex)
        -> Result<ReclaimReceipt, InboxError>;

    /// Moves the inbox surplus to the admin wallet.
    ///
    /// # Errors
    /// - `NothingToWithdraw`: no surplus
    fn withdraw_surplus_inbox_balance(&self, caller: Identity) -> Result<Lamports, InboxError>;

    /// Snapshot of the inbox record.
    fn inbox(&self) -> Option<Inbox>;

    /// Snapshot of a slot record.
    fn slot(&self, index: SlotIndex) -> Option<Slot>;

    fn is_whitelisted(&self, identity: &Identity) -> bool;

    /// Withdrawable inbox balance.
    fn free_balance(&self) -> Lamports;

    fn wallet_balance(&self, identity: &Identity) -> Lamports;

    fn status(&self) -> InboxStatus;
}
