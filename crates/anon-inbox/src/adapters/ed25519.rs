//! # Ed25519 Signature Adapter
//!
//! `SignatureVerifier` backed by `ed25519-dalek`. An `Identity` is the
//! verifying key's 32 compressed bytes.

use crate::domain::{Identity, InboxError};
use crate::ports::SignatureVerifier;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use tracing::debug;

/// Production signature verifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519SignatureVerifier;

impl Ed25519SignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for Ed25519SignatureVerifier {
    fn verify(
        &self,
        identity: &Identity,
        message: &[u8],
        signature: &[u8; 64],
    ) -> Result<(), InboxError> {
        let verifying_key = VerifyingKey::from_bytes(identity.as_bytes()).map_err(|_| {
            debug!(identity = ?identity, "Identity is not a valid ed25519 point");
            InboxError::Unauthenticated(*identity)
        })?;

        let sig = Signature::from_bytes(signature);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| InboxError::Unauthenticated(*identity))
    }
}
