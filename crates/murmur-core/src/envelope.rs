//! The envelope wire record.
//!
//! An envelope is the transport-facing container: expiry, requested TTL,
//! the ordered abridged topic list, opaque (possibly encrypted) data, and
//! the proof-of-work nonce. Wire form is a 5-field RLP list:
//!
//! ```text
//! [expiry: u32][ttl: u32][topics: list of 4-byte tags][data: bytes][nonce: u256]
//! ```
//!
//! Envelopes are immutable after sealing except for the nonce, which is
//! written exactly once by [`Envelope::prove_work`]. Callers own exclusive
//! access while proving; a proven envelope is freely shareable read-only.

use crate::error::WireError;
use crate::message::{DecryptMode, Message};
use crate::pow;
use crate::topic::Topic;
use murmur_crypto::{keccak256, Hash};
use primitive_types::U256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::time::Duration;
use tracing::debug;

/// Topic-addressed, optionally proof-of-worked, possibly-encrypted message
/// container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    expiry: u32,
    ttl: u32,
    topics: Vec<Topic>,
    data: Vec<u8>,
    nonce: U256,
}

impl Envelope {
    /// Construct a pre-proof envelope (nonce 0).
    ///
    /// Normally called through sealing; exposed for transports that build
    /// envelopes from already-encrypted data.
    pub fn new(expiry: u32, ttl: u32, topics: Vec<Topic>, data: Vec<u8>) -> Self {
        Self {
            expiry,
            ttl,
            topics,
            data,
            nonce: U256::zero(),
        }
    }

    /// Absolute expiry time (seconds since epoch).
    pub fn expiry(&self) -> u32 {
        self.expiry
    }

    /// Requested time-to-live in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Abridged topic tags; position is the broadcast key slot index.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Opaque payload as produced by sealing.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Proof-of-work nonce.
    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    /// Whether the envelope has expired at `now` (seconds since epoch).
    pub fn is_expired(&self, now: u32) -> bool {
        self.expiry <= now
    }

    /// Decode an envelope from its RLP wire form.
    ///
    /// Fields are copied verbatim; no cross-field validation happens here.
    /// Whether the data actually opens is decided by [`Envelope::open`].
    pub fn from_rlp(bytes: &[u8]) -> Result<Self, WireError> {
        Ok(rlp::decode(bytes)?)
    }

    /// Encode the envelope to its RLP wire form.
    pub fn to_rlp(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Hash of the envelope without its nonce: the proof-of-work base.
    fn work_base(&self) -> Hash {
        let mut s = RlpStream::new_list(4);
        s.append(&self.expiry);
        s.append(&self.ttl);
        s.append_list(&self.topics);
        s.append(&self.data);
        keccak256(s.as_raw())
    }

    /// Search for the best proof-of-work nonce within `budget`.
    ///
    /// Best-effort maximization, not a pass/fail puzzle: the best nonce
    /// found when the deadline expires is stored, even if it scores zero.
    /// Runs synchronously on the calling thread for up to the budget; the
    /// deadline is polled once per 1024 candidates, so the final batch may
    /// overshoot slightly. This is the sole mutation after construction.
    pub fn prove_work(&mut self, budget: Duration) {
        let base = self.work_base();
        self.nonce = pow::search(&base, budget);
        debug!(
            score = self.work_proved(),
            budget_ms = budget.as_millis() as u64,
            "Envelope proof-of-work attached"
        );
    }

    /// Verify the attached proof-of-work: the leading-zero-bit count of
    /// `keccak256(work_base || nonce)`.
    ///
    /// Pure and deterministic; receivers use it to rank or admit envelopes
    /// without trusting any claimed effort.
    pub fn work_proved(&self) -> u32 {
        pow::score(&self.work_base(), &self.nonce)
    }

    /// Try to open this envelope with a caller-selected decryption mode.
    ///
    /// Returns `None` whenever the secret does not open the envelope;
    /// adversarial bytes never produce an error or a panic.
    pub fn open(&self, mode: &DecryptMode) -> Option<Message> {
        Message::open(self, mode)
    }

    /// Parse unencrypted envelope data directly as a message frame.
    ///
    /// Counterpart of sealing without a recipient (broadcast without
    /// confidentiality).
    pub fn open_plain(&self) -> Option<Message> {
        Message::open_plain(self)
    }
}

impl Encodable for Envelope {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(5);
        s.append(&self.expiry);
        s.append(&self.ttl);
        s.append_list(&self.topics);
        s.append(&self.data);
        s.append(&self.nonce);
    }
}

impl Decodable for Envelope {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if !rlp.is_list() {
            return Err(DecoderError::RlpExpectedToBeList);
        }
        if rlp.item_count()? != 5 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            expiry: rlp.val_at(0)?,
            ttl: rlp.val_at(1)?,
            topics: rlp.list_at(2)?,
            data: rlp.val_at(3)?,
            nonce: rlp.val_at(4)?,
        })
    }
}
