//! URL-safe Base64 without padding
//!
//! Encoding runs the standard alphabet over fixed-size chunks and then
//! rewrites `+`/`/` to `-`/`_` and drops `=`. Decoding reverses the alphabet
//! and restores padding before decoding, so padded and unpadded input are
//! both accepted. Like a browser's `atob`, the decoder ignores non-zero bits
//! left over in the final symbol.

use crate::error::CodecError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::Engine;

/// Standard alphabet, tolerant of non-zero trailing bits
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Bytes encoded per chunk.
///
/// Largest multiple of three not above 32 KiB: a chunk never ends mid-group,
/// so concatenating per-chunk output equals encoding the whole buffer.
pub const ENCODE_CHUNK_SIZE: usize = (32 * 1024 / 3) * 3;

/// Encode bytes as URL-safe Base64 without padding
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut standard = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(ENCODE_CHUNK_SIZE) {
        STANDARD.encode_string(chunk, &mut standard);
    }

    standard
        .chars()
        .filter_map(|c| match c {
            '+' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            other => Some(other),
        })
        .collect()
}

/// Decode URL-safe Base64, with or without padding
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is not valid Base64 once the
/// alphabet and padding are restored.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let standard: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    Ok(LENIENT.decode(restore_padding(&standard))?)
}

/// Decode into a fixed-size array
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed text and
/// [`CodecError::Length`] if the decoded length is not `N`.
pub fn decode_exact<const N: usize>(text: &str) -> Result<[u8; N], CodecError> {
    let bytes = decode(text)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| CodecError::Length {
        expected: N,
        actual: bytes.len(),
    })
}

/// Append `=` until the length is a multiple of four
#[must_use]
pub fn restore_padding(text: &str) -> String {
    let missing = (4 - text.len() % 4) % 4;
    let mut padded = String::with_capacity(text.len() + missing);
    padded.push_str(text);
    padded.extend(std::iter::repeat('=').take(missing));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_is_a_whole_number_of_groups() {
        assert_eq!(ENCODE_CHUNK_SIZE % 3, 0);
        assert!(ENCODE_CHUNK_SIZE <= 32 * 1024);
        assert_eq!(ENCODE_CHUNK_SIZE, 32_766);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode(&[0xff; 3]), "____");
    }

    #[test]
    fn test_restore_padding() {
        assert_eq!(restore_padding(""), "");
        assert_eq!(restore_padding("Zg"), "Zg==");
        assert_eq!(restore_padding("Zm8"), "Zm8=");
        assert_eq!(restore_padding("Zm9v"), "Zm9v");
    }

    #[test]
    fn test_decode_accepts_padded_and_unpadded() {
        assert_eq!(decode("Zm8").expect("unpadded"), b"fo");
        assert_eq!(decode("Zm8=").expect("padded"), b"fo");
        assert_eq!(decode("-_8").expect("url alphabet"), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("!!!!"), Err(CodecError::Decode(_))));
        assert!(matches!(decode("Z"), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        // "Zh" and "Zg" both carry 'f' in their significant bits
        assert_eq!(decode("Zh").expect("trailing bits"), b"f");
        assert_eq!(decode("Zm9").expect("trailing bits"), b"fo");
        let mut seed = "A".repeat(42);
        seed.push('B');
        assert_eq!(decode(&seed).expect("seed with trailing bits"), vec![0u8; 32]);
    }

    #[test]
    fn test_decode_exact_reports_length() {
        let err = decode_exact::<32>(&encode(&[7u8; 31])).expect_err("31 bytes must fail");
        assert_eq!(
            err,
            CodecError::Length {
                expected: 32,
                actual: 31
            }
        );
        assert_eq!(
            decode_exact::<4>(&encode(&[1, 2, 3, 4])).expect("exact"),
            [1, 2, 3, 4]
        );
    }
}
