//! # Murmur Crypto - Cryptographic Primitives
//!
//! The complete set of primitives consumed by the messaging core.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Frame digests, topic tags, proof-of-work |
//! | `ecdsa` | secp256k1 (recoverable) | Sender authentication |
//! | `ecies` | ECDH + HKDF-SHA256 + XChaCha20-Poly1305 | Single-recipient encryption |
//! | `symmetric` | XChaCha20-Poly1305 | Topic-scoped broadcast encryption |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, public key recoverable
//!   from the 65-byte signature (no key distribution needed for senders)
//! - **ECIES**: fresh ephemeral key per encryption, forward-secret against
//!   ephemeral compromise, AEAD-authenticated ciphertext
//! - **XChaCha20**: 192-bit random nonce, constant-time ARX design
//! - Key material is zeroized on drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod ecies;
pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use ecdsa::{KeyPair, PublicKey, RecoverableSignature, SIGNATURE_SIZE};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_pair, Hash};
pub use symmetric::{SymmetricKey, KEY_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
