//! # Symmetric Encryption
//!
//! XChaCha20-Poly1305 with a self-contained ciphertext layout
//! (`nonce || ciphertext || tag`), so encrypted frames can be embedded in
//! an envelope as a single opaque byte string.
//!
//! Keys support XOR blinding: broadcast envelopes carry a per-topic key
//! slot of `topic_secret XOR session_key`, and a receiver holding the
//! topic secret unblinds the session key with a second XOR.

use crate::errors::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use zeroize::Zeroize;

/// Symmetric key size in bytes (256-bit).
pub const KEY_SIZE: usize = 32;

/// XChaCha20 nonce size in bytes (192-bit).
pub const NONCE_SIZE: usize = 24;

/// Symmetric key (256-bit).
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate a random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// XOR this key with a 32-byte mask.
    ///
    /// XOR is its own inverse: `k.xor(m).xor(m) == k`.
    pub fn xor(&self, mask: &[u8; KEY_SIZE]) -> Self {
        let mut out = [0u8; KEY_SIZE];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i] ^ mask[i];
        }
        Self(out)
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey(..)")
    }
}

/// Encrypt plaintext, returning `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the AEAD rejects the input.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` on truncated input, a wrong key,
/// or a tampered ciphertext. The error carries no detail: callers treat all
/// decryption failures identically.
pub fn decrypt(key: &SymmetricKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < NONCE_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }
    let (nonce, ciphertext) = data.split_at(NONCE_SIZE);

    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}
