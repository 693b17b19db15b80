//! Encoding detection and replace-on-error decoding.
//!
//! Detection order: a byte-order mark wins, then UTF-8 if the bytes are
//! valid UTF-8 (or only cut short mid-character), then the statistical
//! guess from `chardetng`. Empty input has no detectable encoding and is
//! decoded as UTF-8.

use std::io::{self, Read};

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// Substituted for every malformed byte sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Text produced by [`decode_replacing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// The encoding actually used (a BOM can override the detected one).
    pub encoding: &'static Encoding,
    /// Whether any sequence was replaced with [`REPLACEMENT_CHARACTER`].
    pub had_errors: bool,
}

/// Best guess at the encoding of `bytes`, or `None` for empty input.
pub fn detect_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.is_empty() {
        return None;
    }
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return Some(encoding);
    }
    match std::str::from_utf8(bytes) {
        Ok(_) => return Some(UTF_8),
        // Valid up to a character cut off at the end of the buffer.
        Err(err) if err.error_len().is_none() => return Some(UTF_8),
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Some(detector.guess(None, true))
}

/// Decode `bytes` with the detected encoding, replacing malformed sequences.
///
/// Falls back to UTF-8 when nothing can be detected.
pub fn decode_replacing(bytes: &[u8]) -> DecodedText {
    let encoding = detect_encoding(bytes).unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding: used,
        had_errors,
    }
}

/// Read from `reader` and return its contents as text.
///
/// Reads at most `size` bytes, or everything that is left when `size` is
/// `None`. The reader is not closed and stays positioned after the bytes
/// consumed.
///
/// # Errors
///
/// Only I/O errors from `reader`. Malformed input is replaced, never
/// reported.
///
/// # Examples
///
/// ```
/// use reuse_text::decoded_text_from_binary;
///
/// let mut input: &[u8] = b"SPDX-License-Identifier: MIT\n";
/// let text = decoded_text_from_binary(&mut input, Some(4)).unwrap();
/// assert_eq!(text, "SPDX");
/// ```
pub fn decoded_text_from_binary<R: Read + ?Sized>(
    reader: &mut R,
    size: Option<usize>,
) -> io::Result<String> {
    let mut raw = Vec::new();
    match size {
        Some(limit) => {
            let limit = u64::try_from(limit).unwrap_or(u64::MAX);
            Read::take(reader, limit).read_to_end(&mut raw)?;
        }
        None => {
            reader.read_to_end(&mut raw)?;
        }
    }

    let decoded = decode_replacing(&raw);
    if decoded.had_errors {
        debug!(
            "replaced malformed {} sequences in {} bytes",
            decoded.encoding.name(),
            raw.len()
        );
    }
    Ok(decoded.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_16LE;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_valid_utf8_is_returned_unchanged() {
        let original = "Grüße, 世界 ✓\nSPDX-FileCopyrightText: 2017 Jane Doe\n";
        let mut input = Cursor::new(original.as_bytes().to_vec());
        let text = decoded_text_from_binary(&mut input, None).unwrap();
        assert_eq!(text, original);
        assert!(!text.contains(REPLACEMENT_CHARACTER));
    }

    #[test]
    fn test_empty_input_decodes_as_utf8() {
        assert_eq!(detect_encoding(b""), None);
        let decoded = decode_replacing(b"");
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.encoding, UTF_8);
        assert!(!decoded.had_errors);
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        // UTF-8 BOM, then a byte that can never appear in UTF-8.
        let bytes = b"\xEF\xBB\xBFa\xFFb";
        assert_eq!(detect_encoding(bytes), Some(UTF_8));

        let decoded = decode_replacing(bytes);
        assert_eq!(decoded.text, "a\u{FFFD}b");
        assert!(decoded.had_errors);

        let mut input: &[u8] = bytes;
        let text = decoded_text_from_binary(&mut input, None).unwrap();
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn test_utf16_bom_with_dangling_byte() {
        let bytes = b"\xFF\xFEh\x00i\x00A";
        assert_eq!(detect_encoding(bytes), Some(UTF_16LE));
        let decoded = decode_replacing(bytes);
        assert_eq!(decoded.text, "hi\u{FFFD}");
        assert!(decoded.had_errors);
    }

    #[test]
    fn test_size_limits_bytes_read() {
        let mut input = Cursor::new(b"hello world".to_vec());
        let text = decoded_text_from_binary(&mut input, Some(5)).unwrap();
        assert_eq!(text, "hello");

        let rest = decoded_text_from_binary(&mut input, None).unwrap();
        assert_eq!(rest, " world");
    }

    #[test]
    fn test_size_larger_than_input() {
        let mut input: &[u8] = b"short";
        let text = decoded_text_from_binary(&mut input, Some(1024)).unwrap();
        assert_eq!(text, "short");
    }

    #[test]
    fn test_truncated_character_stays_utf8() {
        // "abé" cut in the middle of the two-byte "é".
        let bytes = "abé".as_bytes();
        let mut input: &[u8] = bytes;
        let text = decoded_text_from_binary(&mut input, Some(3)).unwrap();
        assert_eq!(text, "ab\u{FFFD}");
    }

    #[test]
    fn test_legacy_single_byte_text_is_detected() {
        let bytes = b"Le caf\xe9 de la cr\xe8me br\xfbl\xe9e est d\xe9licieux, \
                      la cr\xe8me et le caf\xe9 sont pr\xeats pour la f\xeate.";
        let decoded = decode_replacing(bytes);
        assert_ne!(decoded.encoding, UTF_8);
        assert!(!decoded.had_errors);
        assert!(decoded.text.starts_with("Le caf"));
    }

    #[test]
    fn test_read_errors_propagate() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let err = decoded_text_from_binary(&mut Broken, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
