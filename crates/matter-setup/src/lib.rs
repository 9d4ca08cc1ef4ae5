//! Matter onboarding codes: PASE verifier derivation and manual pairing
//! code encoding, plus the random-value helpers used to provision them.

pub mod base64;
pub mod curve;
pub mod error;
pub mod manual_code;
pub mod payload;
pub mod random;
pub mod types;
pub mod verhoeff;
pub mod verifier;

pub use base64::{base64_decode, base64_encode};
pub use curve::{PaseCurve, P256};
pub use error::SetupError;
pub use manual_code::{
    encode_manual_code, ManualPairingCode, LONG_CODE_LENGTH, SHORT_CODE_LENGTH,
};
pub use payload::{SetupCodes, SetupPayload};
pub use random::{
    generate_discriminator, generate_discriminator_with, generate_iterations,
    generate_iterations_with, generate_passcode, generate_passcode_with, generate_salt,
    generate_salt_bytes, generate_salt_bytes_with, OsRandom, RandomSource,
};
pub use types::{
    is_valid_discriminator, is_valid_passcode, is_valid_salt_length, FALLBACK_PASSCODE,
    INVALID_PASSCODES, MAX_DISCRIMINATOR, MAX_ITERATIONS, MAX_PASSCODE, MAX_PASSCODE_ATTEMPTS,
    MAX_SALT_LENGTH, MIN_ITERATIONS, MIN_PASSCODE, MIN_SALT_LENGTH, VERIFIER_LENGTH, WS_LENGTH,
};
pub use verhoeff::{check_digit, validate as validate_check_digit};
pub use verifier::{derive_verifier, derive_verifier_bytes_with, PaseVerifier};
