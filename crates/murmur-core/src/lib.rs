//! # Murmur Core - Store-and-Forward Confidential Messaging
//!
//! The Envelope/Message pair: a sender broadcasts a payload under a topic,
//! optionally signs it, optionally encrypts it for one recipient or for a
//! set of topic-subscribed recipients, and attaches a tunable anti-spam
//! proof-of-work token.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `envelope` | Wire record `{expiry, ttl, topics, data, nonce}`, RLP codec |
//! | `pow` | Deadline-bounded nonce search and work scoring |
//! | `message` | Plaintext view; sealing (sign + encrypt) and opening |
//! | `topic` | 4-byte topic tags and broadcast key material |
//!
//! ## Flow
//!
//! ```text
//! sender:   Message ──seal()──→ Envelope ──prove_work()──→ transport
//! receiver: transport ──→ Envelope ──open(mode)──→ Option<Message>
//! ```
//!
//! Opening is total: adversarial bytes never panic and never propagate an
//! error - a secret either opens an envelope or it does not. Peer
//! discovery, relaying, topic-filter matching, and envelope storage belong
//! to the surrounding transport layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod error;
pub mod message;
pub mod pow;
pub mod topic;

// Re-exports
pub use envelope::Envelope;
pub use error::{SealError, WireError};
pub use message::{DecryptMode, Message};
pub use topic::{topic_secret, FullTopic, Topic, TOPIC_SIZE};

// The crypto surface callers need to drive seal/open
pub use murmur_crypto::{KeyPair, PublicKey, SymmetricKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
