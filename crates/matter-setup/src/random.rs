//! Random onboarding values: passcode, discriminator, salt, iteration count.

use crate::base64::base64_encode;
use crate::error::SetupError;
use crate::types::{
    is_valid_passcode, FALLBACK_PASSCODE, MAX_DISCRIMINATOR, MAX_ITERATIONS, MAX_PASSCODE,
    MAX_PASSCODE_ATTEMPTS, MAX_SALT_LENGTH, MIN_ITERATIONS, MIN_PASSCODE, MIN_SALT_LENGTH,
};

/// Draws made by [`uniform_inclusive`] before giving up on a source that
/// keeps landing in the rejection zone.
const MAX_REJECTIONS: usize = 64;

/// Source of random words and bytes.
pub trait RandomSource {
    fn next_u32(&mut self) -> Result<u32, SetupError>;

    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), SetupError>;
}

/// Operating-system randomness via `getrandom`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u32(&mut self) -> Result<u32, SetupError> {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), SetupError> {
        getrandom::getrandom(dest).map_err(|e| SetupError::RngFailed(e.to_string()))
    }
}

/// Uniform value in `low..=high`, using rejection to avoid modulo bias.
pub fn uniform_inclusive<R: RandomSource + ?Sized>(
    rng: &mut R,
    low: u32,
    high: u32,
) -> Result<u32, SetupError> {
    try_uniform_inclusive(rng, low, high)?.ok_or_else(|| {
        SetupError::RngFailed(format!(
            "no value in {low}..={high} after {MAX_REJECTIONS} draws"
        ))
    })
}

/// Like [`uniform_inclusive`], but `Ok(None)` when every draw landed in the
/// rejection zone. Only a failing source is an error.
fn try_uniform_inclusive<R: RandomSource + ?Sized>(
    rng: &mut R,
    low: u32,
    high: u32,
) -> Result<Option<u32>, SetupError> {
    debug_assert!(low <= high);
    let span = u64::from(high - low) + 1;
    // Largest multiple of `span` that fits in 32 bits.
    let limit = (1u64 << 32) - (1u64 << 32) % span;
    for _ in 0..MAX_REJECTIONS {
        let x = u64::from(rng.next_u32()?);
        if x < limit {
            return Ok(Some(low + (x % span) as u32));
        }
    }
    Ok(None)
}

/// Random setup passcode that passes [`is_valid_passcode`].
///
/// A draw that is invalid, or that never leaves the rejection zone, counts
/// as one failed attempt. After [`MAX_PASSCODE_ATTEMPTS`] failed attempts
/// returns [`FALLBACK_PASSCODE`].
pub fn generate_passcode_with<R: RandomSource + ?Sized>(rng: &mut R) -> Result<u32, SetupError> {
    for _ in 0..MAX_PASSCODE_ATTEMPTS {
        match try_uniform_inclusive(rng, MIN_PASSCODE, MAX_PASSCODE)? {
            Some(candidate) if is_valid_passcode(candidate) => return Ok(candidate),
            Some(_) => tracing::trace!("rejected weak passcode candidate"),
            None => tracing::trace!("random source stuck in rejection zone"),
        }
    }
    tracing::warn!(
        attempts = MAX_PASSCODE_ATTEMPTS,
        "no valid passcode drawn, using fallback passcode"
    );
    Ok(FALLBACK_PASSCODE)
}

pub fn generate_passcode() -> Result<u32, SetupError> {
    generate_passcode_with(&mut OsRandom)
}

/// Random 12-bit discriminator.
pub fn generate_discriminator_with<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<u16, SetupError> {
    let value = uniform_inclusive(rng, 0, u32::from(MAX_DISCRIMINATOR))?;
    Ok(value as u16)
}

pub fn generate_discriminator() -> Result<u16, SetupError> {
    generate_discriminator_with(&mut OsRandom)
}

/// Random salt bytes of random length in 8..=16.
pub fn generate_salt_bytes_with<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<Vec<u8>, SetupError> {
    let len = uniform_inclusive(rng, MIN_SALT_LENGTH as u32, MAX_SALT_LENGTH as u32)? as usize;
    let mut salt = vec![0u8; len];
    rng.fill_bytes(&mut salt)?;
    Ok(salt)
}

pub fn generate_salt_bytes() -> Result<Vec<u8>, SetupError> {
    generate_salt_bytes_with(&mut OsRandom)
}

/// Random salt, base64-encoded.
pub fn generate_salt() -> Result<String, SetupError> {
    generate_salt_bytes().map(|salt| base64_encode(&salt))
}

/// Random PBKDF2 iteration count in 1000..=100000.
pub fn generate_iterations_with<R: RandomSource + ?Sized>(rng: &mut R) -> Result<u32, SetupError> {
    uniform_inclusive(rng, MIN_ITERATIONS, MAX_ITERATIONS)
}

pub fn generate_iterations() -> Result<u32, SetupError> {
    generate_iterations_with(&mut OsRandom)
}
