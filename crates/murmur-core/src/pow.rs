//! Proof-of-work nonce search and scoring.
//!
//! Not a fixed-target puzzle: the search maximizes the leading-zero-bit
//! count of `keccak256(base || nonce)` within a wall-clock budget, and the
//! receiver recomputes that count to rank envelopes by the effort spent on
//! them. A larger count is exponentially costlier to produce, which makes
//! it a continuous, verifiable anti-spam cost metric.

use murmur_crypto::{keccak256_pair, Hash};
use primitive_types::U256;
use std::time::{Duration, Instant};
use tracing::debug;

/// Candidates evaluated between deadline polls.
///
/// The final batch may overshoot the deadline by up to this many hash
/// evaluations.
const BATCH_SIZE: u32 = 1024;

/// Leading-zero-bit count of a 256-bit hash.
pub fn leading_zero_bits(hash: &Hash) -> u32 {
    U256::from_big_endian(hash).leading_zeros()
}

/// Score a nonce against a work base: `leading_zero_bits(keccak256(base || nonce))`.
///
/// The nonce is hashed as a 256-bit big-endian block, so scoring is a pure
/// function of `(base, nonce)`.
pub fn score(base: &Hash, nonce: &U256) -> u32 {
    let mut nonce_bytes = [0u8; 32];
    nonce.to_big_endian(&mut nonce_bytes);
    leading_zero_bits(&keccak256_pair(base, &nonce_bytes))
}

/// Search for the best-scoring nonce within `budget`.
///
/// Candidates are `n = 0, 1, 2, …` placed in the low 32 bits of an
/// otherwise-zero 256-bit big-endian nonce. The running best is replaced
/// only on a strictly greater score, so the earliest nonce wins ties.
/// A zero budget evaluates nothing and returns nonce 0.
pub(crate) fn search(base: &Hash, budget: Duration) -> U256 {
    let deadline = Instant::now() + budget;

    let mut candidate = [0u8; 32];
    let mut n: u32 = 0;
    let mut best_nonce = 0u32;
    let mut best_score = 0u32;
    let mut evaluated: u64 = 0;

    while Instant::now() < deadline {
        // Rounds of 1024 so the clock is not read per candidate
        for _ in 0..BATCH_SIZE {
            candidate[28..].copy_from_slice(&n.to_be_bytes());
            let s = leading_zero_bits(&keccak256_pair(base, &candidate));
            if s > best_score {
                best_score = s;
                best_nonce = n;
            }
            n = n.wrapping_add(1);
        }
        evaluated += u64::from(BATCH_SIZE);
    }

    debug!(evaluated, best_score, "Proof-of-work search finished");
    U256::from(best_nonce)
}
