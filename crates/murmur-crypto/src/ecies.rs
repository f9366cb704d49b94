//! # Hybrid Public-Key Encryption (ECIES)
//!
//! Single-recipient encryption over secp256k1: a fresh ephemeral keypair
//! per message, ECDH against the recipient key, HKDF-SHA256 to derive the
//! content key, then the crate's XChaCha20-Poly1305 AEAD.
//!
//! Ciphertext layout:
//!
//! ```text
//! [ephemeral public key: 65 bytes][nonce: 24 bytes][ciphertext || tag]
//! ```
//!
//! Decryption is all-or-nothing: any truncation, wrong key, or tampering
//! surfaces as a single opaque `DecryptionFailed`.

use crate::ecdsa::{KeyPair, PublicKey};
use crate::errors::CryptoError;
use crate::symmetric::{self, SymmetricKey, KEY_SIZE};
use hkdf::Hkdf;
use k256::ecdh::diffie_hellman;
use k256::ecdsa::{SigningKey, VerifyingKey};
use sha2::Sha256;

/// Ephemeral public key size (uncompressed SEC1).
const EPHEMERAL_KEY_SIZE: usize = 65;

/// HKDF domain separator for the content key.
const KDF_INFO: &[u8] = b"murmur/ecies/xchacha20poly1305";

/// Derive the 32-byte content key from the ECDH shared secret.
///
/// Both public keys enter the KDF so the key is bound to this exact
/// (ephemeral, recipient) pair.
fn derive_key(
    shared_x: &[u8],
    ephemeral_pub: &[u8; EPHEMERAL_KEY_SIZE],
    recipient_pub: &[u8; EPHEMERAL_KEY_SIZE],
) -> Result<SymmetricKey, CryptoError> {
    let mut ikm = Vec::with_capacity(shared_x.len() + 2 * EPHEMERAL_KEY_SIZE);
    ikm.extend_from_slice(shared_x);
    ikm.extend_from_slice(ephemeral_pub);
    ikm.extend_from_slice(recipient_pub);

    let hk = Hkdf::<Sha256>::new(None, &ikm);
    let mut okm = [0u8; KEY_SIZE];
    hk.expand(KDF_INFO, &mut okm)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(SymmetricKey::from_bytes(okm))
}

/// Encrypt `plaintext` so only the holder of `to`'s private key can read it.
pub fn encrypt(to: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let recipient = to.verifying_key()?;

    let ephemeral = SigningKey::random(&mut rand::thread_rng());
    let ephemeral_pub = *PublicKey::from_verifying_key(ephemeral.verifying_key()).as_bytes();

    let shared = diffie_hellman(ephemeral.as_nonzero_scalar(), recipient.as_affine());
    let key = derive_key(shared.raw_secret_bytes().as_slice(), &ephemeral_pub, to.as_bytes())?;

    let sealed = symmetric::encrypt(&key, plaintext)?;

    let mut out = Vec::with_capacity(EPHEMERAL_KEY_SIZE + sealed.len());
    out.extend_from_slice(&ephemeral_pub);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypt a ciphertext produced by [`encrypt`] with the recipient keypair.
pub fn decrypt(keypair: &KeyPair, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < EPHEMERAL_KEY_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }
    let (eph_bytes, sealed) = data.split_at(EPHEMERAL_KEY_SIZE);

    let ephemeral = VerifyingKey::from_sec1_bytes(eph_bytes)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let mut ephemeral_pub = [0u8; EPHEMERAL_KEY_SIZE];
    ephemeral_pub.copy_from_slice(eph_bytes);

    let shared = diffie_hellman(
        keypair.signing_key().as_nonzero_scalar(),
        ephemeral.as_affine(),
    );
    let key = derive_key(
        shared.raw_secret_bytes().as_slice(),
        &ephemeral_pub,
        keypair.public_key().as_bytes(),
    )
    .map_err(|_| CryptoError::DecryptionFailed)?;

    symmetric::decrypt(&key, sealed)
}
