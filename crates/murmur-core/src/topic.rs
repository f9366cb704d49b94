//! Topic tags and broadcast key material.
//!
//! Applications address messages with arbitrary byte strings ("full
//! topics"). On the wire an envelope only carries the abridged 4-byte tag
//! (the Keccak-256 prefix), which is enough for routing but does not
//! reveal the full topic. The full 32-byte digest doubles as the topic
//! secret for broadcast-mode encryption, so knowing a full topic is what
//! grants the ability to open broadcast envelopes on it.

use murmur_crypto::{keccak256, SymmetricKey};

/// Abridged topic tag size in bytes.
pub const TOPIC_SIZE: usize = 4;

/// 4-byte abridged topic tag carried on the wire.
///
/// Ordering inside an envelope is significant: the position of a tag is
/// the index of its key slot in broadcast-mode data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Topic([u8; TOPIC_SIZE]);

impl Topic {
    /// Abridge a full topic to its 4-byte wire tag.
    pub fn from_full(part: &[u8]) -> Self {
        let digest = keccak256(part);
        let mut tag = [0u8; TOPIC_SIZE];
        tag.copy_from_slice(&digest[..TOPIC_SIZE]);
        Self(tag)
    }

    /// Get the raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; TOPIC_SIZE] {
        &self.0
    }
}

impl rlp::Encodable for Topic {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl rlp::Decodable for Topic {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        rlp.decoder().decode_value(|bytes| {
            if bytes.len() != TOPIC_SIZE {
                return Err(rlp::DecoderError::Custom("topic tag must be 4 bytes"));
            }
            let mut tag = [0u8; TOPIC_SIZE];
            tag.copy_from_slice(bytes);
            Ok(Topic(tag))
        })
    }
}

/// Derive the 32-byte broadcast key material for one full topic.
pub fn topic_secret(part: &[u8]) -> SymmetricKey {
    SymmetricKey::from_bytes(keccak256(part))
}

/// Ordered list of full topic byte strings, as supplied at seal time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FullTopic(Vec<Vec<u8>>);

impl FullTopic {
    /// Create from full topic parts; insertion order is slot order.
    pub fn new(parts: Vec<Vec<u8>>) -> Self {
        Self(parts)
    }

    /// Number of topic parts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the topic list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full topic parts in slot order.
    pub fn parts(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Abridged 4-byte tags in slot order.
    pub fn abridged(&self) -> Vec<Topic> {
        self.0.iter().map(|part| Topic::from_full(part)).collect()
    }

    /// Broadcast key material per topic, in slot order.
    pub fn secrets(&self) -> Vec<SymmetricKey> {
        self.0.iter().map(|part| topic_secret(part)).collect()
    }
}

impl<T: Into<Vec<u8>>> FromIterator<T> for FullTopic {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
