//! Messaging core error types.
//!
//! Deliberately small: adversarial input during opening never surfaces as
//! an error at all (`open` returns `Option`), so the only fallible
//! surfaces are wire decoding and sealing.

use murmur_crypto::CryptoError;
use thiserror::Error;

/// Wire decoding errors.
#[derive(Debug, Error)]
pub enum WireError {
    /// Envelope RLP structure is invalid
    #[error("Invalid envelope encoding: {0}")]
    Decode(#[from] rlp::DecoderError),
}

/// Sealing errors.
#[derive(Debug, Error)]
pub enum SealError {
    /// A cryptographic primitive rejected its input
    #[error("Sealing failed: {0}")]
    Crypto(#[from] CryptoError),

    /// The signature produced during sealing does not recover to the
    /// signer's own public key.
    ///
    /// This is an internal-consistency fault in the sign/recover pair, not
    /// bad caller input. Continuing would seal an unverifiable message, so
    /// callers must treat it as unrecoverable.
    #[error("Sign/recover round-trip mismatch while sealing")]
    SignRecoverMismatch,
}
