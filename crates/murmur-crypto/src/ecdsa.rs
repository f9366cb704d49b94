//! # Recoverable ECDSA Signatures (secp256k1)
//!
//! Sender authentication for sealed messages. Signatures are 65 bytes
//! (`r || s || v`): the trailing recovery id lets a receiver recover the
//! signer's public key directly from the signature, so envelopes never
//! carry the sender key in the clear.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization
//! - Secret scalar zeroized on drop (handled by `k256`)

use crate::errors::CryptoError;
use crate::hashing::Hash;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

/// Recoverable signature size in bytes (`r || s || v`).
pub const SIGNATURE_SIZE: usize = 65;

/// Uncompressed secp256k1 public key (65 bytes, `0x04 || x || y`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; 65]);

impl PublicKey {
    /// Create from uncompressed SEC1 bytes.
    pub fn from_bytes(bytes: [u8; 65]) -> Result<Self, CryptoError> {
        // Validate it's a valid curve point
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw uncompressed bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    pub(crate) fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // x-coordinate prefix is plenty for log correlation
        write!(f, "PublicKey(04{:02x}{:02x}{:02x}{:02x}..)", self.0[1], self.0[2], self.0[3], self.0[4])
    }
}

/// Recoverable ECDSA signature (65 bytes, `r || s || v`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature([u8; 65]);

impl RecoverableSignature {
    /// Create from bytes (65 bytes).
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }
}

/// secp256k1 keypair.
///
/// Used both as a signing identity (recoverable ECDSA) and as a decryption
/// identity (ECIES, see [`crate::ecies`]).
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret scalar bytes (32 bytes).
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes(bytes.into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get the public key (uncompressed, 65 bytes).
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, producing a recoverable signature.
    pub fn sign_recoverable(&self, digest: &Hash) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Ok(RecoverableSignature(bytes))
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Recover the signer's public key from a signature over `digest`.
///
/// Fails on malformed `r`/`s`, an out-of-range recovery id, or a signature
/// that does not resolve to a curve point.
pub fn recover(
    signature: &RecoverableSignature,
    digest: &Hash,
) -> Result<PublicKey, CryptoError> {
    let sig = Signature::from_slice(&signature.0[..64])
        .map_err(|_| CryptoError::InvalidSignature)?;
    let recovery_id =
        RecoveryId::from_byte(signature.0[64]).ok_or(CryptoError::InvalidSignature)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(PublicKey::from_verifying_key(&verifying_key))
}
