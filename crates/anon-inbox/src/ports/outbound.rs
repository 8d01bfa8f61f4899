//! Outbound (Driven) ports for the inbox.

use crate::domain::{Identity, InboxError};

/// Checks that `signature` over `message` was produced by `identity`.
pub trait SignatureVerifier: Send + Sync {
    /// # Errors
    /// - `Unauthenticated`: signature invalid or key malformed
    fn verify(
        &self,
        identity: &Identity,
        message: &[u8],
        signature: &[u8; 64],
    ) -> Result<(), InboxError>;
}

/// Mock verifier for testing.
#[cfg(test)]
pub struct MockVerifier {
    accept: bool,
}

#[cfg(test)]
impl MockVerifier {
    pub fn accepting() -> Self {
        Self { accept: true }
    }

    pub fn rejecting() -> Self {
        Self { accept: false }
    }
}

#[cfg(test)]
impl SignatureVerifier for MockVerifier {
    fn verify(
        &self,
        identity: &Identity,
        _message: &[u8],
        _signature: &[u8; 64],
    ) -> Result<(), InboxError> {
        if self.accept {
            Ok(())
        } else {
            Err(InboxError::Unauthenticated(*identity))
        }
    }
}
