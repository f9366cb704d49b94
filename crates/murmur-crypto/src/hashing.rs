//! # Keccak-256 Hashing
//!
//! Single hash function used everywhere in the core: frame digests before
//! signing, topic tag derivation, and the proof-of-work search.

use sha3::{Digest, Keccak256};

/// Keccak-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash the 64-byte concatenation of two 32-byte blocks.
///
/// This is the proof-of-work scoring hash: `keccak256(base || nonce)`.
pub fn keccak256_pair(a: &Hash, b: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}
