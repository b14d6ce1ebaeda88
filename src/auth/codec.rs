//! Base64 codecs for token segments and password record fields.
//!
//! Session token segments use the URL-safe alphabet with all padding
//! stripped; password records store their salt and digest in standard
//! padded base64.

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use thiserror::Error;

/// Input outside the expected alphabet or with corrupt padding.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid base64 encoding")]
pub struct DecodeError;

/// Encode bytes as URL-safe base64 with padding stripped.
#[must_use]
pub fn base64url_encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode URL-safe unpadded base64.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input is not valid unpadded URL-safe
/// base64.
pub fn base64url_decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    Base64UrlUnpadded::decode_vec(input).map_err(|_| DecodeError)
}

/// Encode bytes as standard padded base64.
#[must_use]
pub(crate) fn base64_encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
}

/// Decode standard padded base64.
pub(crate) fn base64_decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    Base64::decode_vec(input).map_err(|_| DecodeError)
}
