//! # IPC Layer
//!
//! Wire form of inbox requests and the handler that authenticates them.

pub mod handler;
pub mod payloads;

pub use handler::RequestHandler;
pub use payloads::{signing_bytes, InboxRequest, InboxResponse, SignedRequest};
