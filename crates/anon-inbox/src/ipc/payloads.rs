//! # IPC Message Payloads
//!
//! Serializable request and response types. Requests travel inside a
//! [`SignedRequest`] whose signature covers the bincode encoding of the
//! signer, the nonce and the request.

use crate::domain::{
    Identity, InboxError, Lamports, ReclaimReceipt, SendReceipt, SlotIndex, WhitelistReceipt,
};
use bincode::Options;
use serde::{Deserialize, Serialize};

/// One inbox operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxRequest {
    Initialize,
    ChangeAdmin {
        new_admin: Identity,
    },
    AddToWhitelist {
        identity: Identity,
    },
    RemoveFromWhitelist {
        identity: Identity,
    },
    SendMessage {
        recipient: Identity,
        content: Vec<u8>,
    },
    SendRegularMessage {
        recipient: Identity,
        content: Vec<u8>,
    },
    SendWhitelistedMessage {
        recipient: Identity,
        content: Vec<u8>,
    },
    ReclaimSlot {
        index: SlotIndex,
    },
    WithdrawSurplusInboxBalance,
}

impl InboxRequest {
    /// Operation name used as a log field.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ChangeAdmin { .. } => "change_admin",
            Self::AddToWhitelist { .. } => "add_to_whitelist",
            Self::RemoveFromWhitelist { .. } => "remove_from_whitelist",
            Self::SendMessage { .. } => "send_message",
            Self::SendRegularMessage { .. } => "send_regular_message",
            Self::SendWhitelistedMessage { .. } => "send_whitelisted_message",
            Self::ReclaimSlot { .. } => "reclaim_slot",
            Self::WithdrawSurplusInboxBalance => "withdraw_surplus_inbox_balance",
        }
    }
}

/// Fields covered by the signature.
#[derive(Serialize)]
struct SigningPayload<'a> {
    signer: &'a Identity,
    nonce: u64,
    request: &'a InboxRequest,
}

/// Canonical bytes a signer signs for `request`.
pub fn signing_bytes(
    signer: &Identity,
    nonce: u64,
    request: &InboxRequest,
) -> Result<Vec<u8>, InboxError> {
    bincode::serialize(&SigningPayload {
        signer,
        nonce,
        request,
    })
    .map_err(|e| InboxError::Serialization(e.to_string()))
}

/// An authenticated request envelope.
///
/// # Security
/// - `nonce` must exceed the signer's last accepted nonce
/// - `signature` is ed25519 over [`signing_bytes`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest {
    /// Claimed identity.
    pub signer: Identity,
    /// Per-signer strictly increasing counter.
    pub nonce: u64,
    /// Signature over the signing bytes.
    #[serde(with = "signature_bytes")]
    pub signature: [u8; 64],
    /// The operation.
    pub request: InboxRequest,
}

impl SignedRequest {
    /// Bytes the signature must cover.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, InboxError> {
        signing_bytes(&self.signer, self.nonce, &self.request)
    }

    /// Decodes a request from its bincode wire form.
    ///
    /// The buffer must hold exactly one envelope.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InboxError> {
        wire_options()
            .deserialize(bytes)
            .map_err(|e| InboxError::Serialization(e.to_string()))
    }

    /// Encodes the request to its bincode wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, InboxError> {
        wire_options()
            .serialize(self)
            .map_err(|e| InboxError::Serialization(e.to_string()))
    }
}

// Fixed-width little-endian integers, same layout as `bincode::serialize`.
fn wire_options() -> impl Options {
    bincode::options()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Result of a dispatched request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxResponse {
    Initialized { floor: Lamports },
    AdminChanged { previous: Identity },
    Whitelist(WhitelistReceipt),
    Sent(SendReceipt),
    Reclaimed(ReclaimReceipt),
    Withdrawn { amount: Lamports },
}

// serde only derives arrays up to 32 elements.
mod signature_bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 64], D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| D::Error::invalid_length(v.len(), &"64 bytes"))
    }
}
