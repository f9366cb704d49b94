//! The plaintext view of an envelope, and the seal/open protocol.
//!
//! A frame is the byte sequence that gets encrypted into envelope data:
//!
//! ```text
//! [flags: 1 byte][payload][signature: 65 bytes, iff flags bit 0]
//! ```
//!
//! Sealing signs the payload digest (recoverable ECDSA), picks an
//! encryption mode from the message's recipient, wraps the result in an
//! envelope and attaches proof-of-work. Opening inverts that under a
//! caller-selected [`DecryptMode`]; every failure under adversarial input
//! collapses to `None`.

use crate::envelope::Envelope;
use crate::error::SealError;
use crate::topic::FullTopic;
use murmur_crypto::ecdsa::{self, RecoverableSignature};
use murmur_crypto::{
    ecies, keccak256, symmetric, KeyPair, PublicKey, SymmetricKey, KEY_SIZE, SIGNATURE_SIZE,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

/// Frame flags bit 0: a 65-byte recoverable signature trails the payload.
const SIGNATURE_FLAG: u8 = 0x01;

/// How a receiver's secret relates to the envelope data.
///
/// The mode is chosen explicitly by the caller (it knows which secrets it
/// holds and why); envelopes carry no mode discriminant, and the content
/// is deliberately never sniffed to guess one.
#[derive(Clone)]
pub enum DecryptMode {
    /// The receiver's own private key, against hybrid public-key
    /// encrypted data. A successful open records the matching public key
    /// as the message recipient.
    Direct(KeyPair),

    /// A topic-scoped shared secret plus the slot index of the topic in
    /// the envelope's topic list. Anyone holding the secret for a listed
    /// topic can open; no recipient identity is recorded.
    TopicIndexed {
        /// 32-byte topic secret (see [`crate::topic::topic_secret`]).
        secret: SymmetricKey,
        /// Position of the topic in the envelope's topic list.
        topic_index: usize,
    },
}

/// Decrypted/plaintext view of an envelope's contents.
///
/// Constructed fresh per seal or open; never mutated afterwards. `sender`
/// is only ever recovered from a valid signature, never chosen by the
/// opener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
    sender: Option<PublicKey>,
    recipient: Option<PublicKey>,
}

impl Message {
    /// Create a message carrying `payload`, addressed to no one.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            sender: None,
            recipient: None,
        }
    }

    /// Address the message to a single recipient; sealing will encrypt
    /// the frame so only the holder of the matching private key can open.
    pub fn with_recipient(mut self, to: PublicKey) -> Self {
        self.recipient = Some(to);
        self
    }

    /// Application plaintext.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Verified sender identity, present iff the frame carried a valid
    /// signature.
    pub fn sender(&self) -> Option<&PublicKey> {
        self.sender.as_ref()
    }

    /// Recipient identity, present iff the message was opened with a
    /// private key that decrypts it directly.
    pub fn recipient(&self) -> Option<&PublicKey> {
        self.recipient.as_ref()
    }

    /// Seal into an envelope: sign (if a signer is given), encrypt for
    /// the recipient (if one is set), attach proof-of-work.
    ///
    /// Without a recipient the frame is stored unencrypted - broadcast
    /// without confidentiality; use [`Message::seal_broadcast`] for
    /// topic-scoped confidentiality.
    pub fn seal(
        &self,
        signer: Option<&KeyPair>,
        topic: &FullTopic,
        ttl: u32,
        work_budget: Duration,
    ) -> Result<Envelope, SealError> {
        let frame = self.build_frame(signer)?;

        let data = match &self.recipient {
            Some(to) => ecies::encrypt(to, &frame)?,
            None => frame,
        };

        Ok(self.wrap(topic, ttl, work_budget, data))
    }

    /// Seal for every subscriber of the listed topics.
    ///
    /// A random session key encrypts the frame; each topic's 32-byte key
    /// slot carries `topic_secret XOR session_key`, laid out in topic
    /// order ahead of the ciphertext. A receiver holding any listed
    /// topic's secret opens with [`DecryptMode::TopicIndexed`] at that
    /// topic's index. Any recipient set on the message is ignored: one
    /// ciphertext serves the whole topic audience.
    pub fn seal_broadcast(
        &self,
        signer: Option<&KeyPair>,
        topic: &FullTopic,
        ttl: u32,
        work_budget: Duration,
    ) -> Result<Envelope, SealError> {
        let frame = self.build_frame(signer)?;

        let session = SymmetricKey::generate();
        let sealed = symmetric::encrypt(&session, &frame)?;

        let mut data = Vec::with_capacity(KEY_SIZE * topic.len() + sealed.len());
        for secret in topic.secrets() {
            data.extend_from_slice(secret.xor(session.as_bytes()).as_bytes());
        }
        data.extend_from_slice(&sealed);

        Ok(self.wrap(topic, ttl, work_budget, data))
    }

    /// Build `[flags][payload][signature?]` and enforce the sign/recover
    /// invariant on fresh signatures.
    fn build_frame(&self, signer: Option<&KeyPair>) -> Result<Vec<u8>, SealError> {
        let mut frame = Vec::with_capacity(1 + self.payload.len() + SIGNATURE_SIZE);
        frame.push(0u8);
        frame.extend_from_slice(&self.payload);

        if let Some(signer) = signer {
            let digest = keccak256(&self.payload);
            let signature = signer.sign_recoverable(&digest)?;

            // A signature we just produced must recover to our own key;
            // anything else means the sign/recover pair is broken and the
            // sealed message would be unverifiable.
            match ecdsa::recover(&signature, &digest) {
                Ok(recovered) if recovered == signer.public_key() => {}
                _ => {
                    error!(
                        "Fresh signature does not recover to the signer's key; refusing to seal"
                    );
                    return Err(SealError::SignRecoverMismatch);
                }
            }

            frame[0] |= SIGNATURE_FLAG;
            frame.extend_from_slice(signature.as_bytes());
        }

        Ok(frame)
    }

    fn wrap(&self, topic: &FullTopic, ttl: u32, work_budget: Duration, data: Vec<u8>) -> Envelope {
        let mut envelope = Envelope::new(
            unix_now().saturating_add(ttl),
            ttl,
            topic.abridged(),
            data,
        );
        envelope.prove_work(work_budget);
        envelope
    }

    /// Open an envelope under a caller-selected mode.
    ///
    /// Total over adversarial input: malformed ciphertext, bad MACs,
    /// out-of-range indices, truncated buffers and malformed signatures
    /// all yield `None`.
    pub(crate) fn open(envelope: &Envelope, mode: &DecryptMode) -> Option<Message> {
        match mode {
            DecryptMode::Direct(keypair) => {
                let frame = ecies::decrypt(keypair, envelope.data()).ok()?;
                let (payload, sender) = parse_frame(&frame)?;
                Some(Message {
                    payload,
                    sender,
                    recipient: Some(keypair.public_key()),
                })
            }
            DecryptMode::TopicIndexed {
                secret,
                topic_index,
            } => {
                let slots = envelope.topics().len();
                let data = envelope.data();
                if *topic_index >= slots {
                    debug!(topic_index, slots, "Topic index out of range");
                    return None;
                }
                if data.len() < KEY_SIZE * slots {
                    // Too short to carry the key slots: permanently
                    // unopenable on this path, same as a wrong secret
                    return None;
                }

                let mut mask = [0u8; KEY_SIZE];
                mask.copy_from_slice(&data[KEY_SIZE * topic_index..KEY_SIZE * (topic_index + 1)]);
                let key = secret.xor(&mask);

                let frame = symmetric::decrypt(&key, &data[KEY_SIZE * slots..]).ok()?;
                let (payload, sender) = parse_frame(&frame)?;
                Some(Message {
                    payload,
                    sender,
                    recipient: None,
                })
            }
        }
    }

    /// Parse unencrypted envelope data as a frame.
    pub(crate) fn open_plain(envelope: &Envelope) -> Option<Message> {
        let (payload, sender) = parse_frame(envelope.data())?;
        Some(Message {
            payload,
            sender,
            recipient: None,
        })
    }
}

/// Split a decrypted frame into payload and (optional) recovered sender.
///
/// An empty frame is no message. A set signature flag with fewer than 65
/// bytes after the flags byte falls back to treating the whole remainder
/// as payload; only a present-but-unrecoverable signature is rejected.
fn parse_frame(frame: &[u8]) -> Option<(Vec<u8>, Option<PublicKey>)> {
    if frame.is_empty() {
        return None;
    }

    let flags = frame[0];
    let rest = &frame[1..];

    if flags & SIGNATURE_FLAG != 0 && rest.len() >= SIGNATURE_SIZE {
        let (payload, sig_bytes) = rest.split_at(rest.len() - SIGNATURE_SIZE);

        let mut sig = [0u8; SIGNATURE_SIZE];
        sig.copy_from_slice(sig_bytes);

        let digest = keccak256(payload);
        let sender = ecdsa::recover(&RecoverableSignature::from_bytes(sig), &digest).ok()?;
        Some((payload.to_vec(), Some(sender)))
    } else {
        Some((rest.to_vec(), None))
    }
}

/// Current wall-clock time in whole seconds since the epoch.
fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as u32
}
