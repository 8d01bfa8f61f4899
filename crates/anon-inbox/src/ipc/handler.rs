//! IPC request handler for the inbox.
//!
//! Authenticates a [`SignedRequest`] and dispatches it to an [`InboxApi`].
//!
//! # Security
//!
//! 1. signature verified against the claimed signer
//! 2. nonce must exceed the signer's last accepted nonce
//! 3. only then is the request dispatched with the signer as caller
//!
//! A nonce is consumed once the request is authenticated, whether or not the
//! inbox accepts the operation.
//!
//! The nonce table keeps one entry per signer that ever authenticated.
//! Entries are never evicted: forgetting a signer would let its old requests
//! replay.

use crate::domain::{Identity, InboxError};
use crate::ipc::payloads::{InboxRequest, InboxResponse, SignedRequest};
use crate::ports::{InboxApi, SignatureVerifier};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// IPC request handler.
pub struct RequestHandler<A: InboxApi, V: SignatureVerifier> {
    inbox: Arc<A>,
    verifier: V,
    nonces: Mutex<HashMap<Identity, u64>>,
}

impl<A: InboxApi, V: SignatureVerifier> RequestHandler<A, V> {
    pub fn new(inbox: Arc<A>, verifier: V) -> Self {
        Self {
            inbox,
            verifier,
            nonces: Mutex::new(HashMap::new()),
        }
    }

    /// The inbox requests are dispatched to.
    pub fn inbox(&self) -> &Arc<A> {
        &self.inbox
    }

    /// Highest nonce accepted from `signer`.
    pub fn last_nonce(&self, signer: &Identity) -> Option<u64> {
        self.nonces.lock().get(signer).copied()
    }

    /// Decodes, authenticates and dispatches a bincode-encoded request.
    pub fn handle_bytes(&self, bytes: &[u8]) -> Result<InboxResponse, InboxError> {
        self.handle(SignedRequest::from_bytes(bytes)?)
    }

    /// Authenticates and dispatches a request.
    pub fn handle(&self, signed: SignedRequest) -> Result<InboxResponse, InboxError> {
        let caller = self.authenticate(&signed)?;
        debug!(
            operation = signed.request.operation(),
            nonce = signed.nonce,
            "Dispatching authenticated request"
        );
        self.dispatch(caller, signed.request)
    }

    fn authenticate(&self, signed: &SignedRequest) -> Result<Identity, InboxError> {
        let message = signed.signing_bytes()?;
        if let Err(error) = self
            .verifier
            .verify(&signed.signer, &message, &signed.signature)
        {
            warn!(signer = ?signed.signer, "Signature verification failed");
            return Err(error);
        }

        let mut nonces = self.nonces.lock();
        if let Some(&last) = nonces.get(&signed.signer) {
            if signed.nonce <= last {
                warn!(signer = ?signed.signer, nonce = signed.nonce, last, "Replayed request");
                return Err(InboxError::ReplayedRequest {
                    nonce: signed.nonce,
                    last,
                });
            }
        }
        nonces.insert(signed.signer, signed.nonce);
        Ok(signed.signer)
    }

    fn dispatch(&self, caller: Identity, request: InboxRequest) -> Result<InboxResponse, InboxError> {
        let inbox = self.inbox.as_ref();
        let response = match request {
            InboxRequest::Initialize => InboxResponse::Initialized {
                floor: inbox.initialize(caller)?,
            },
            InboxRequest::ChangeAdmin { new_admin } => InboxResponse::AdminChanged {
                previous: inbox.change_admin(caller, new_admin)?,
            },
            InboxRequest::AddToWhitelist { identity } => {
                InboxResponse::Whitelist(inbox.add_to_whitelist(caller, identity)?)
            }
            InboxRequest::RemoveFromWhitelist { identity } => {
                InboxResponse::Whitelist(inbox.remove_from_whitelist(caller, identity)?)
            }
            InboxRequest::SendMessage { recipient, content } => {
                InboxResponse::Sent(inbox.send_message(caller, recipient, content)?)
            }
            InboxRequest::SendRegularMessage { recipient, content } => {
                InboxResponse::Sent(inbox.send_regular_message(caller, recipient, content)?)
            }
            InboxRequest::SendWhitelistedMessage { recipient, content } => {
                InboxResponse::Sent(inbox.send_whitelisted_message(caller, recipient, content)?)
            }
            InboxRequest::ReclaimSlot { index } => {
                InboxResponse::Reclaimed(inbox.reclaim_slot(caller, index)?)
            }
            InboxRequest::WithdrawSurplusInboxBalance => InboxResponse::Withdrawn {
                amount: inbox.withdraw_surplus_inbox_balance(caller)?,
            },
        };
        Ok(response)
    }
}
