//! # Integration Tests
//!
//! - `flows`: signed requests through `RequestHandler` into `InboxService`
//! - `invariants`: accounting rules under random operation sequences

pub mod flows;
pub mod invariants;
