//! # Ports Layer
//!
//! - `inbound`: `InboxApi`, the driving port
//! - `outbound`: `SignatureVerifier`, the driven port

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
