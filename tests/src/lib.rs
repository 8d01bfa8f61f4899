//! # Anonymous Inbox Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Signing wallets, funded services, log setup
//! └── integration/
//!     ├── flows.rs      # Signed end-to-end scenarios
//!     └── invariants.rs # Seeded random operation sequences
//! tests/benches/
//! └── inbox_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p inbox-tests
//! cargo test -p inbox-tests integration::invariants
//! cargo bench -p inbox-tests
//! ```

pub mod integration;
