//! # End-to-End Seal/Open Flows
//!
//! Exercises the full sender-side and receiver-side pipeline across the
//! wire boundary:
//!
//! ```text
//! [Message] ──seal──→ [Envelope] ──to_rlp──→ bytes ──→ (transport)
//! (transport) ──→ bytes ──from_rlp──→ [Envelope] ──open──→ [Message]
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: direct, broadcast, and plain envelopes round trip
//! 2. **Authentication**: recovered senders match signers, and only signers
//! 3. **Adversarial**: wrong keys, wrong slots, and strangers get nothing

#[cfg(test)]
mod tests {
    use crate::integration::init_tracing;
    use murmur_core::{topic_secret, DecryptMode, Envelope, FullTopic, KeyPair, Message};
    use std::time::Duration;

    const NO_WORK: Duration = Duration::ZERO;
    const SMALL_WORK: Duration = Duration::from_millis(20);

    fn news_topic() -> FullTopic {
        [b"news/headlines".to_vec(), b"news/weather".to_vec()]
            .into_iter()
            .collect()
    }

    /// Ship an envelope across the "network" as raw bytes.
    fn transport(envelope: &Envelope) -> Envelope {
        Envelope::from_rlp(&envelope.to_rlp()).expect("sealed envelope must decode")
    }

    #[test]
    fn direct_message_round_trips_over_the_wire() {
        init_tracing();

        let sender = KeyPair::generate();
        let recipient = KeyPair::generate();

        let sealed = Message::new(b"meet at dawn".as_slice())
            .with_recipient(recipient.public_key())
            .seal(Some(&sender), &news_topic(), 60, SMALL_WORK)
            .unwrap();

        let received = transport(&sealed);
        let opened = received
            .open(&DecryptMode::Direct(recipient.clone()))
            .unwrap();

        assert_eq!(opened.payload(), b"meet at dawn");
        assert_eq!(opened.sender(), Some(&sender.public_key()));
        assert_eq!(opened.recipient(), Some(&recipient.public_key()));
    }

    #[test]
    fn unsigned_direct_message_has_no_sender() {
        let recipient = KeyPair::generate();

        let sealed = Message::new(b"hello".as_slice())
            .with_recipient(recipient.public_key())
            .seal(None, &news_topic(), 60, NO_WORK)
            .unwrap();

        let opened = transport(&sealed)
            .open(&DecryptMode::Direct(recipient.clone()))
            .unwrap();

        assert_eq!(opened.payload(), b"hello");
        assert_eq!(opened.sender(), None);
        assert_eq!(opened.recipient(), Some(&recipient.public_key()));
    }

    #[test]
    fn stranger_cannot_open_direct_message() {
        let recipient = KeyPair::generate();

        let sealed = Message::new(b"private".as_slice())
            .with_recipient(recipient.public_key())
            .seal(None, &news_topic(), 60, NO_WORK)
            .unwrap();
        let received = transport(&sealed);

        for _ in 0..8 {
            let stranger = KeyPair::generate();
            assert!(received.open(&DecryptMode::Direct(stranger)).is_none());
        }
    }

    #[test]
    fn broadcast_reaches_every_topic_subscriber() {
        init_tracing();

        let author = KeyPair::generate();
        let topic = news_topic();

        let sealed = Message::new(b"extra! extra!".as_slice())
            .seal_broadcast(Some(&author), &topic, 60, NO_WORK)
            .unwrap();
        let received = transport(&sealed);

        // A headlines subscriber and a weather subscriber each open their
        // own slot of the same ciphertext
        for (index, part) in [b"news/headlines".as_slice(), b"news/weather".as_slice()]
            .iter()
            .enumerate()
        {
            let opened = received
                .open(&DecryptMode::TopicIndexed {
                    secret: topic_secret(part),
                    topic_index: index,
                })
                .unwrap();

            assert_eq!(opened.payload(), b"extra! extra!");
            assert_eq!(opened.sender(), Some(&author.public_key()));
            assert_eq!(opened.recipient(), None);
        }
    }

    #[test]
    fn non_subscriber_cannot_open_broadcast() {
        let sealed = Message::new(b"members only".as_slice())
            .seal_broadcast(None, &news_topic(), 60, NO_WORK)
            .unwrap();
        let received = transport(&sealed);

        assert!(received
            .open(&DecryptMode::TopicIndexed {
                secret: topic_secret(b"news/sports"),
                topic_index: 0,
            })
            .is_none());
        assert!(received
            .open(&DecryptMode::TopicIndexed {
                secret: topic_secret(b"news/headlines"),
                topic_index: 5,
            })
            .is_none());
    }

    #[test]
    fn plain_envelope_round_trips_without_confidentiality() {
        let sealed = Message::new(b"public notice".as_slice())
            .seal(None, &news_topic(), 60, NO_WORK)
            .unwrap();

        let opened = transport(&sealed).open_plain().unwrap();
        assert_eq!(opened.payload(), b"public notice");
        assert_eq!(opened.sender(), None);
        assert_eq!(opened.recipient(), None);
    }

    #[test]
    fn envelope_carries_abridged_topics_in_order() {
        let topic = news_topic();
        let sealed = Message::new(b"x".as_slice())
            .seal(None, &topic, 60, NO_WORK)
            .unwrap();

        assert_eq!(transport(&sealed).topics(), topic.abridged().as_slice());
    }
}
