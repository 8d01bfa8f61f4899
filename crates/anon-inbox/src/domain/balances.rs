//! # Balance Ledger
//!
//! Lamport balances of identities outside the inbox (senders, admins) plus
//! the surplus arithmetic for the inbox itself.

use super::entities::{Identity, Lamports};
use super::errors::InboxError;
use std::collections::HashMap;

/// External wallet balances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    wallets: HashMap<Identity, Lamports>,
}

impl BalanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `identity`; unknown identities hold zero.
    pub fn balance_of(&self, identity: &Identity) -> Lamports {
        self.wallets.get(identity).copied().unwrap_or(0)
    }

    /// Fails with `InsufficientBalance` unless `identity` holds `amount`.
    pub fn ensure_can_pay(&self, identity: &Identity, amount: Lamports) -> Result<(), InboxError> {
        let available = self.balance_of(identity);
        if available < amount {
            return Err(InboxError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Fails with `ArithmeticOverflow` if crediting `amount` would overflow.
    pub fn ensure_can_receive(&self, identity: &Identity, amount: Lamports) -> Result<(), InboxError> {
        self.balance_of(identity)
            .checked_add(amount)
            .map(|_| ())
            .ok_or(InboxError::ArithmeticOverflow)
    }

    /// Adds lamports to a wallet.
    pub fn credit(&mut self, identity: Identity, amount: Lamports) -> Result<Lamports, InboxError> {
        let entry = self.wallets.entry(identity).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or(InboxError::ArithmeticOverflow)?;
        Ok(*entry)
    }

    /// Removes lamports from a wallet.
    pub fn debit(&mut self, identity: &Identity, amount: Lamports) -> Result<Lamports, InboxError> {
        self.ensure_can_pay(identity, amount)?;
        let entry = self.wallets.entry(*identity).or_insert(0);
        *entry -= amount;
        Ok(*entry)
    }

    /// Sum of every wallet.
    pub fn total(&self) -> u128 {
        self.wallets.values().map(|v| *v as u128).sum()
    }
}

/// Inbox balance above its own floor and every slot reserve.
pub fn surplus(held: Lamports, floor: Lamports, reserved: Lamports) -> Lamports {
    held.saturating_sub(floor).saturating_sub(reserved)
}
