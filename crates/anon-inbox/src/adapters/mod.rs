//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod ed25519;

pub use ed25519::Ed25519SignatureVerifier;
