//! # Inbox Ledger
//!
//! The complete inbox state and every operation that changes it.
//!
//! Each operation runs in two phases:
//!
//! 1. **Plan**: authorization, validation and pricing against an immutable
//!    view. Every error is raised here.
//! 2. **Apply**: the plan is written back. Nothing in this phase can fail once
//!    the plan succeeded, so a rejected operation leaves no trace.
//!
//! ## Balance model
//!
//! ```text
//! held_balance = floor + Σ slot reserves + free balance
//! ```
//!
//! Whitelist deposits live in their own records and are returned to the admin
//! who removes the entry. External wallets hold everything else; together
//! with `held_balance` and the deposits they are conserved by every operation.

use crate::algorithms::{
    inbox_floor, plan_paying_send, plan_whitelisted_send, validate_content_len, whitelist_deposit,
    AllocationPlan,
};
use crate::domain::{
    check_all, slot_address, surplus, BalanceLedger, Identity, Inbox, InboxConfig, InboxError,
    InboxStatus, Lamports, ReclaimReceipt, SendPath, SendReceipt, Slot, SlotIndex, SlotStore,
    WhitelistReceipt, WhitelistRegistry,
};
use tracing::debug;

/// Inbox, slots, whitelist and external wallets.
#[derive(Clone, Debug)]
pub struct LedgerState {
    config: InboxConfig,
    inbox: Option<Inbox>,
    slots: SlotStore,
    whitelist: WhitelistRegistry,
    wallets: BalanceLedger,
}

impl LedgerState {
    /// Empty, uninitialized ledger.
    pub fn new(config: InboxConfig) -> Self {
        Self {
            config,
            inbox: None,
            slots: SlotStore::new(),
            whitelist: WhitelistRegistry::new(),
            wallets: BalanceLedger::new(),
        }
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    // =========================================================================
    // Funding
    // =========================================================================

    /// Funds an external wallet. Returns the new balance.
    pub fn credit_wallet(
        &mut self,
        identity: Identity,
        amount: Lamports,
    ) -> Result<Lamports, InboxError> {
        self.wallets.credit(identity, amount)
    }

    // =========================================================================
    // Admin operations
    // =========================================================================

    /// Creates the inbox. The initializer becomes admin and pays the floor.
    pub fn initialize(&mut self, initializer: Identity) -> Result<Lamports, InboxError> {
        if self.inbox.is_some() {
            return Err(InboxError::AlreadyInitialized);
        }
        let floor = inbox_floor(&self.config.rent);
        self.wallets.ensure_can_pay(&initializer, floor)?;

        self.wallets.debit(&initializer, floor)?;
        self.inbox = Some(Inbox::new(initializer, floor));
        Ok(floor)
    }

    /// Replaces the admin. Returns the previous admin.
    pub fn change_admin(
        &mut self,
        caller: Identity,
        new_admin: Identity,
    ) -> Result<Identity, InboxError> {
        self.require_admin(&caller)?;
        let inbox = self.inbox.as_mut().ok_or(InboxError::NotInitialized)?;
        let previous = inbox.admin;
        inbox.admin = new_admin;
        Ok(previous)
    }

    /// Adds `identity` to the whitelist; the admin pays the entry deposit.
    ///
    /// An existing entry is left untouched and nothing is charged.
    pub fn add_to_whitelist(
        &mut self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError> {
        self.require_admin(&caller)?;
        if self.whitelist.contains(&identity) {
            return Ok(WhitelistReceipt {
                identity,
                created: false,
                deposit: 0,
            });
        }
        let deposit = whitelist_deposit(&self.config.rent);
        self.wallets.ensure_can_pay(&caller, deposit)?;

        self.wallets.debit(&caller, deposit)?;
        self.whitelist.insert(identity, deposit);
        Ok(WhitelistReceipt {
            identity,
            created: true,
            deposit,
        })
    }

    /// Removes `identity` from the whitelist and refunds its deposit to the caller.
    pub fn remove_from_whitelist(
        &mut self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError> {
        self.require_admin(&caller)?;
        let deposit = self
            .whitelist
            .get(&identity)
            .map(|entry| entry.rent_deposit)
            .ok_or(InboxError::NotWhitelisted(identity))?;
        self.wallets.ensure_can_receive(&caller, deposit)?;

        self.whitelist.remove(&identity);
        self.wallets.credit(caller, deposit)?;
        Ok(WhitelistReceipt {
            identity,
            created: false,
            deposit,
        })
    }

    /// Destroys a slot; its reserve joins the inbox free balance.
    pub fn reclaim_slot(
        &mut self,
        caller: Identity,
        index: SlotIndex,
    ) -> Result<ReclaimReceipt, InboxError> {
        self.require_admin(&caller)?;
        let slot = self
            .slots
            .remove(index)
            .ok_or(InboxError::SlotNotFound(index))?;
        Ok(ReclaimReceipt {
            index,
            released: slot.reserved_balance,
        })
    }

    /// Moves everything above the floor and the slot reserves to the caller.
    pub fn withdraw_surplus(&mut self, caller: Identity) -> Result<Lamports, InboxError> {
        self.require_admin(&caller)?;
        let amount = self.free_balance();
        if amount == 0 {
            return Err(InboxError::NothingToWithdraw);
        }
        self.wallets.ensure_can_receive(&caller, amount)?;

        let Self { inbox, wallets, .. } = self;
        let inbox = inbox.as_mut().ok_or(InboxError::NotInitialized)?;
        wallets.credit(caller, amount)?;
        inbox.held_balance -= amount;
        Ok(amount)
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Sends along the whitelisted path for members, the paying path otherwise.
    pub fn send_message(
        &mut self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        if self.whitelist.contains(&sender) {
            self.send_whitelisted_message(sender, recipient, content)
        } else {
            self.send_regular_message(sender, recipient, content)
        }
    }

    /// Creates a new slot at `next_free_slot`, paid by the sender.
    pub fn send_regular_message(
        &mut self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        let inbox = self.inbox.as_ref().ok_or(InboxError::NotInitialized)?;
        validate_content_len(&self.config, content.len())?;

        let existing = self.slots.get(inbox.next_free_slot);
        let plan = plan_paying_send(inbox, existing, &self.config, content.len() as u64)?;
        self.commit_send(sender, recipient, content, plan)
    }

    /// Reuses the slot at `next_whitelisted_slot` for a whitelisted sender.
    pub fn send_whitelisted_message(
        &mut self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        let inbox = self.inbox.as_ref().ok_or(InboxError::NotInitialized)?;
        if !self.whitelist.contains(&sender) {
            return Err(InboxError::NotWhitelisted(sender));
        }
        validate_content_len(&self.config, content.len())?;

        let existing = self.slots.get(inbox.next_whitelisted_slot);
        let plan = plan_whitelisted_send(
            inbox,
            existing,
            self.free_balance(),
            &self.config,
            content.len() as u64,
        )?;
        self.commit_send(sender, recipient, content, plan)
    }

    fn commit_send(
        &mut self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
        plan: AllocationPlan,
    ) -> Result<SendReceipt, InboxError> {
        debug!(
            index = plan.index,
            path = ?plan.path,
            transition = ?plan.transition,
            sender_charge = plan.sender_charge,
            from_inbox = plan.from_inbox,
            released = plan.released,
            "Allocation planned"
        );

        self.wallets.ensure_can_pay(&sender, plan.sender_charge)?;

        let Self {
            inbox,
            slots,
            wallets,
            ..
        } = self;
        let inbox = inbox.as_mut().ok_or(InboxError::NotInitialized)?;

        let held_balance = inbox
            .held_balance
            .checked_add(plan.sender_charge)
            .ok_or(InboxError::ArithmeticOverflow)?;
        let counter = match plan.path {
            SendPath::Paying => inbox.next_free_slot,
            SendPath::Whitelisted => inbox.next_whitelisted_slot,
        };
        let next_counter = counter
            .checked_add(1)
            .ok_or(InboxError::ArithmeticOverflow)?;

        wallets.debit(&sender, plan.sender_charge)?;
        inbox.held_balance = held_balance;
        match plan.path {
            SendPath::Paying => inbox.next_free_slot = next_counter,
            SendPath::Whitelisted => inbox.next_whitelisted_slot = next_counter,
        }
        slots.put(
            plan.index,
            Slot {
                recipient,
                content,
                capacity: plan.new_capacity,
                reserved_balance: plan.new_reserve,
            },
        );

        Ok(SendReceipt {
            index: plan.index,
            slot_address: slot_address(plan.index),
            path: plan.path,
            transition: plan.transition,
            charged: plan.sender_charge,
            released: plan.released,
            from_inbox: plan.from_inbox,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fails with `NotAdmin` unless `caller` is the current admin.
    pub fn require_admin(&self, caller: &Identity) -> Result<&Inbox, InboxError> {
        let inbox = self.inbox.as_ref().ok_or(InboxError::NotInitialized)?;
        if inbox.admin != *caller {
            return Err(InboxError::NotAdmin { caller: *caller });
        }
        Ok(inbox)
    }

    pub fn inbox(&self) -> Option<&Inbox> {
        self.inbox.as_ref()
    }

    pub fn slot(&self, index: SlotIndex) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn is_whitelisted(&self, identity: &Identity) -> bool {
        self.whitelist.contains(identity)
    }

    pub fn wallet_balance(&self, identity: &Identity) -> Lamports {
        self.wallets.balance_of(identity)
    }

    /// Inbox balance above its floor and every slot reserve.
    pub fn free_balance(&self) -> Lamports {
        self.inbox.as_ref().map_or(0, |inbox| {
            surplus(
                inbox.held_balance,
                inbox_floor(&self.config.rent),
                self.slots.total_reserved(),
            )
        })
    }

    /// Every lamport the ledger tracks: wallets, the inbox and whitelist deposits.
    pub fn total_lamports(&self) -> u128 {
        let held = self.inbox.as_ref().map_or(0, |inbox| inbox.held_balance);
        self.wallets.total() + held as u128 + self.whitelist.total_deposits() as u128
    }

    pub fn status(&self) -> InboxStatus {
        let Some(inbox) = self.inbox.as_ref() else {
            return InboxStatus {
                whitelisted: self.whitelist.len(),
                ..InboxStatus::default()
            };
        };
        InboxStatus {
            initialized: true,
            admin: Some(inbox.admin),
            next_free_slot: inbox.next_free_slot,
            next_whitelisted_slot: inbox.next_whitelisted_slot,
            live_slots: self.slots.len(),
            whitelisted: self.whitelist.len(),
            held_balance: inbox.held_balance,
            reserved_balance: self.slots.total_reserved(),
            free_balance: self.free_balance(),
        }
    }

    /// Names of violated accounting invariants; empty when consistent.
    pub fn check_invariants(&self) -> Vec<&'static str> {
        match self.inbox.as_ref() {
            Some(inbox) => check_all(
                inbox,
                &self.slots,
                inbox_floor(&self.config.rent),
                &self.config.rent,
            ),
            None if self.slots.is_empty() => Vec::new(),
            None => vec!["slot_bounds"],
        }
    }
}
