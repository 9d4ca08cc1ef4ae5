use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid PBKDF2 iteration count: must be at least 1, got {0}")]
    InvalidIterations(u32),

    #[error("Derived w1 scalar is zero: L would be the point at infinity")]
    DegenerateScalar,

    #[error("Invalid verifier length: expected {expected} bytes, got {got}")]
    InvalidVerifierLength { expected: usize, got: usize },

    #[error("Invalid P-256 point: {0}")]
    InvalidPoint(String),

    #[error("Invalid decimal digit: {0:?}")]
    InvalidDigit(char),

    #[error("Invalid manual pairing code length: expected 11 or 21 digits, got {got}")]
    InvalidManualCodeLength { got: usize },

    #[error("Manual pairing code check digit mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: char, got: char },

    #[error("Unsupported manual pairing code version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid manual pairing code: {0}")]
    InvalidManualCode(String),

    #[error("Base64 decode error: {0}")]
    Base64Decode(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}
