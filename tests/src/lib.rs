//! # Murmur Test Suite
//!
//! Unified test crate covering cross-crate behavior:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── seal_open.rs     # Full sender → transport → receiver flows
//!     ├── proof_of_work.rs # Budgeted nonce search and verification
//!     └── wire.rs          # RLP round trips and adversarial bytes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p murmur-tests
//!
//! # By category
//! cargo test -p murmur-tests integration::seal_open
//! cargo test -p murmur-tests integration::proof_of_work
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
