//! # Inbox Service
//!
//! Thread-safe front of the ledger. Implements [`InboxApi`].
//!
//! ## Sequencing
//!
//! The ledger, the event log and the statistics sit behind one
//! `parking_lot::RwLock`. Every mutating request holds the write guard for its
//! whole plan-and-apply cycle, so requests commit one at a time in lock order.
//! Queries share the read guard.
//!
//! ## Observability
//!
//! - committed transitions: `info!` with the event name
//! - rejected requests: `warn!` with the operation and `InboxError::kind`
//! - every committed event is appended to a bounded log (`max_event_log`)

use crate::domain::{
    Identity, Inbox, InboxConfig, InboxError, InboxStatus, Lamports, ReclaimReceipt, SendPath,
    SendReceipt, Slot, SlotIndex, WhitelistReceipt,
};
use crate::events::InboxEvent;
use crate::ledger::LedgerState;
use crate::ports::InboxApi;
use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::{info, instrument, warn};

/// Request counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceStats {
    /// Requests that committed.
    pub requests_accepted: u64,
    /// Requests rejected with an error.
    pub requests_rejected: u64,
    /// Messages written through the paying path.
    pub paid_messages: u64,
    /// Messages written through the whitelisted path.
    pub whitelisted_messages: u64,
}

struct ServiceState {
    ledger: LedgerState,
    events: VecDeque<InboxEvent>,
    stats: ServiceStats,
}

/// The inbox service.
pub struct InboxService {
    max_event_log: usize,
    state: RwLock<ServiceState>,
}

impl InboxService {
    pub fn new(config: InboxConfig) -> Self {
        Self {
            max_event_log: config.max_event_log,
            state: RwLock::new(ServiceState {
                ledger: LedgerState::new(config),
                events: VecDeque::new(),
                stats: ServiceStats::default(),
            }),
        }
    }

    /// Service configured from `INBOX_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(InboxConfig::from_env())
    }

    /// Funds an external wallet. Returns the new balance.
    ///
    /// Funding is not an inbox request and is left out of [`ServiceStats`].
    #[instrument(skip(self))]
    pub fn credit_wallet(
        &self,
        identity: Identity,
        amount: Lamports,
    ) -> Result<Lamports, InboxError> {
        self.state
            .write()
            .ledger
            .credit_wallet(identity, amount)
            .inspect_err(|error| warn!(kind = error.kind(), %error, "Wallet credit rejected"))
    }

    pub fn stats(&self) -> ServiceStats {
        self.state.read().stats.clone()
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> Vec<InboxEvent> {
        self.state.read().events.iter().cloned().collect()
    }

    /// Removes and returns the retained events.
    pub fn drain_events(&self) -> Vec<InboxEvent> {
        self.state.write().events.drain(..).collect()
    }

    /// Every lamport the ledger tracks.
    pub fn total_lamports(&self) -> u128 {
        self.state.read().ledger.total_lamports()
    }

    /// Names of violated accounting invariants.
    pub fn check_invariants(&self) -> Vec<&'static str> {
        self.state.read().ledger.check_invariants()
    }

    pub fn config(&self) -> InboxConfig {
        self.state.read().ledger.config().clone()
    }

    fn execute<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut LedgerState) -> Result<T, InboxError>,
        describe: impl FnOnce(&T) -> Option<InboxEvent>,
    ) -> Result<T, InboxError> {
        let mut state = self.state.write();

        match apply(&mut state.ledger) {
            Ok(value) => {
                state.stats.requests_accepted += 1;
                if let Some(event) = describe(&value) {
                    info!(operation, event = event.name(), "Inbox state committed");
                    if let InboxEvent::MessageSent { path, .. } = &event {
                        match path {
                            SendPath::Paying => state.stats.paid_messages += 1,
                            SendPath::Whitelisted => state.stats.whitelisted_messages += 1,
                        }
                    }
                    self.record(&mut state.events, event);
                }
                debug_assert!(
                    state.ledger.check_invariants().is_empty(),
                    "invariants violated after {operation}"
                );
                Ok(value)
            }
            Err(error) => {
                state.stats.requests_rejected += 1;
                warn!(operation, kind = error.kind(), %error, "Inbox request rejected");
                Err(error)
            }
        }
    }

    fn record(&self, events: &mut VecDeque<InboxEvent>, event: InboxEvent) {
        if self.max_event_log == 0 {
            return;
        }
        while events.len() >= self.max_event_log {
            events.pop_front();
        }
        events.push_back(event);
    }
}

impl InboxApi for InboxService {
    #[instrument(skip(self))]
    fn initialize(&self, initializer: Identity) -> Result<Lamports, InboxError> {
        self.execute(
            "initialize",
            |ledger| ledger.initialize(initializer),
            |floor| {
                Some(InboxEvent::InboxInitialized {
                    admin: initializer,
                    floor: *floor,
                })
            },
        )
    }

    #[instrument(skip(self))]
    fn change_admin(&self, caller: Identity, new_admin: Identity) -> Result<Identity, InboxError> {
        self.execute(
            "change_admin",
            |ledger| ledger.change_admin(caller, new_admin),
            |previous| {
                Some(InboxEvent::AdminChanged {
                    previous: *previous,
                    new_admin,
                })
            },
        )
    }

    #[instrument(skip(self))]
    fn add_to_whitelist(
        &self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError> {
        self.execute(
            "add_to_whitelist",
            |ledger| ledger.add_to_whitelist(caller, identity),
            |receipt| {
                receipt.created.then(|| InboxEvent::WhitelistAdded {
                    identity: receipt.identity,
                    deposit: receipt.deposit,
                })
            },
        )
    }

    #[instrument(skip(self))]
    fn remove_from_whitelist(
        &self,
        caller: Identity,
        identity: Identity,
    ) -> Result<WhitelistReceipt, InboxError> {
        self.execute(
            "remove_from_whitelist",
            |ledger| ledger.remove_from_whitelist(caller, identity),
            |receipt| {
                Some(InboxEvent::WhitelistRemoved {
                    identity: receipt.identity,
                    refund: receipt.deposit,
                })
            },
        )
    }

    #[instrument(skip(self, content), fields(len = content.len()))]
    fn send_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        self.execute(
            "send_message",
            |ledger| ledger.send_message(sender, recipient, content),
            |receipt| Some(message_sent(receipt, recipient)),
        )
    }

    #[instrument(skip(self, content), fields(len = content.len()))]
    fn send_regular_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        self.execute(
            "send_regular_message",
            |ledger| ledger.send_regular_message(sender, recipient, content),
            |receipt| Some(message_sent(receipt, recipient)),
        )
    }

    #[instrument(skip(self, content), fields(len = content.len()))]
    fn send_whitelisted_message(
        &self,
        sender: Identity,
        recipient: Identity,
        content: Vec<u8>,
    ) -> Result<SendReceipt, InboxError> {
        self.execute(
            "send_whitelisted_message",
            |ledger| ledger.send_whitelisted_message(sender, recipient, content),
            |receipt| Some(message_sent(receipt, recipient)),
        )
    }

    #[instrument(skip(self))]
    fn reclaim_slot(&self, caller: Identity, index: SlotIndex) -> Result<ReclaimReceipt, InboxError> {
        self.execute(
            "reclaim_slot",
            |ledger| ledger.reclaim_slot(caller, index),
            |receipt| {
                Some(InboxEvent::SlotReclaimed {
                    index: receipt.index,
                    released: receipt.released,
                })
            },
        )
    }

    #[instrument(skip(self))]
    fn withdraw_surplus_inbox_balance(&self, caller: Identity) -> Result<Lamports, InboxError> {
        self.execute(
            "withdraw_surplus_inbox_balance",
            |ledger| ledger.withdraw_surplus(caller),
            |amount| {
                Some(InboxEvent::SurplusWithdrawn {
                    admin: caller,
                    amount: *amount,
                })
            },
        )
    }

    fn inbox(&self) -> Option<Inbox> {
        self.state.read().ledger.inbox().cloned()
    }

    fn slot(&self, index: SlotIndex) -> Option<Slot> {
        self.state.read().ledger.slot(index).cloned()
    }

    fn is_whitelisted(&self, identity: &Identity) -> bool {
        self.state.read().ledger.is_whitelisted(identity)
    }

    fn free_balance(&self) -> Lamports {
        self.state.read().ledger.free_balance()
    }

    fn wallet_balance(&self, identity: &Identity) -> Lamports {
        self.state.read().ledger.wallet_balance(identity)
    }

    fn status(&self) -> InboxStatus {
        self.state.read().ledger.status()
    }
}

fn message_sent(receipt: &SendReceipt, recipient: Identity) -> InboxEvent {
    InboxEvent::MessageSent {
        index: receipt.index,
        slot_address: receipt.slot_address,
        path: receipt.path,
        transition: receipt.transition,
        recipient,
        charged: receipt.charged,
        released: receipt.released,
        from_inbox: receipt.from_inbox,
    }
}
