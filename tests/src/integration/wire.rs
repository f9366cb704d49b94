//! # Wire-Level Behavior
//!
//! The transport hands this core raw bytes; these tests feed it the kind
//! of bytes a hostile or broken peer would send and check that nothing
//! escapes the `Option`/`Result` surfaces.

#[cfg(test)]
mod tests {
    use murmur_core::{topic_secret, DecryptMode, Envelope, FullTopic, KeyPair, Message, Topic};
    use rand::RngCore;
    use std::time::Duration;

    #[test]
    fn envelope_bytes_round_trip_exactly() {
        let topic: FullTopic = [b"wire".to_vec()].into_iter().collect();
        let sealed = Message::new(b"payload".as_slice())
            .seal(None, &topic, 60, Duration::from_millis(10))
            .unwrap();

        let bytes = sealed.to_rlp();
        let reencoded = Envelope::from_rlp(&bytes).unwrap().to_rlp();
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn random_garbage_never_decodes_to_panic() {
        let mut rng = rand::thread_rng();
        for len in [0usize, 1, 7, 32, 200, 4096] {
            let mut bytes = vec![0u8; len];
            rng.fill_bytes(&mut bytes);
            // Either a clean decode error or, freakishly, a valid envelope;
            // a panic is the only wrong answer
            let _ = Envelope::from_rlp(&bytes);
        }
    }

    #[test]
    fn truncated_encodings_are_rejected() {
        let topic: FullTopic = [b"wire".to_vec()].into_iter().collect();
        let bytes = Message::new(b"payload".as_slice())
            .seal(None, &topic, 60, Duration::ZERO)
            .unwrap()
            .to_rlp();

        for cut in 1..bytes.len() {
            assert!(
                Envelope::from_rlp(&bytes[..cut]).is_err(),
                "prefix of length {cut} decoded"
            );
        }
    }

    #[test]
    fn opening_handcrafted_hostile_envelopes_yields_none() {
        let keypair = KeyPair::generate();
        let tags = vec![Topic::from_full(b"a"), Topic::from_full(b"b")];

        let hostile = [
            // Empty data
            Envelope::new(0, 0, tags.clone(), vec![]),
            // Data shorter than the key slots it advertises
            Envelope::new(0, 0, tags.clone(), vec![0xAA; 40]),
            // Slots present but ciphertext truncated to nothing
            Envelope::new(0, 0, tags.clone(), vec![0xAA; 64]),
            // Pure noise
            Envelope::new(0, 0, tags, vec![0x55; 300]),
        ];

        for envelope in &hostile {
            assert!(envelope.open(&DecryptMode::Direct(keypair.clone())).is_none());
            assert!(envelope
                .open(&DecryptMode::TopicIndexed {
                    secret: topic_secret(b"a"),
                    topic_index: 0,
                })
                .is_none());
        }
    }

    #[test]
    fn oversized_topic_index_is_harmless() {
        let envelope = Envelope::new(0, 0, vec![Topic::from_full(b"a")], vec![0u8; 128]);

        for index in [1usize, 2, usize::MAX] {
            assert!(envelope
                .open(&DecryptMode::TopicIndexed {
                    secret: topic_secret(b"a"),
                    topic_index: index,
                })
                .is_none());
        }
    }
}
