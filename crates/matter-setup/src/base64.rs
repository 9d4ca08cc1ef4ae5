use base64ct::{Base64, Encoding};

use crate::error::SetupError;

/// Base64 encode bytes with the standard alphabet and padding.
pub fn base64_encode(data: &[u8]) -> String {
    Base64::encode_string(data)
}

/// Base64 decode a standard, padded string to bytes.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, SetupError> {
    Base64::decode_vec(s).map_err(|e| SetupError::Base64Decode(e.to_string()))
}
