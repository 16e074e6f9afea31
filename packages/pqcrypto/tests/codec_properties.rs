//! URL-safe Base64 codec checked against an independent encoder

use panelkey_pqcrypto::codec::{self, ENCODE_CHUNK_SIZE};
use proptest::prelude::*;
use rand::RngCore;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

#[test]
fn test_round_trip_selected_lengths() {
    for len in [0usize, 1, 31, 32, 33, 1000, 65536] {
        let bytes = random_bytes(len);
        let encoded = codec::encode(&bytes);
        assert_eq!(encoded, base64_url::encode(&bytes), "length {len}");
        assert_eq!(codec::decode(&encoded).expect("decode"), bytes, "length {len}");
    }
}

#[test]
fn test_chunk_boundaries_match_single_pass() {
    for len in [
        ENCODE_CHUNK_SIZE - 1,
        ENCODE_CHUNK_SIZE,
        ENCODE_CHUNK_SIZE + 1,
        ENCODE_CHUNK_SIZE * 2 + 2,
    ] {
        let bytes = random_bytes(len);
        assert_eq!(codec::encode(&bytes), base64_url::encode(&bytes), "length {len}");
    }
}

#[test]
fn test_decode_reads_oracle_output() {
    let bytes = random_bytes(1952);
    let encoded = base64_url::encode(&bytes);
    assert_eq!(codec::decode(&encoded).expect("decode"), bytes);
    assert_eq!(
        codec::decode(&codec::restore_padding(&encoded)).expect("decode padded"),
        bytes
    );
}

proptest! {
    #[test]
    fn prop_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let encoded = codec::encode(&bytes);
        prop_assert_eq!(codec::decode(&encoded).expect("decode"), bytes);
    }

    #[test]
    fn prop_alphabet(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let encoded = codec::encode(&bytes);
        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        prop_assert_eq!(encoded.len(), (bytes.len() * 4).div_ceil(3));
    }
}
