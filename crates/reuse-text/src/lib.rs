//! Turning bytes of unknown encoding into text.
//!
//! Decoding never fails on malformed input: bytes that do not fit the
//! detected encoding come out as U+FFFD.

pub mod decode;

pub use decode::{
    DecodedText, REPLACEMENT_CHARACTER, decode_replacing, decoded_text_from_binary,
    detect_encoding,
};
