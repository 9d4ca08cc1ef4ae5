//! PASE verifier derivation.
//!
//! ```text
//! ws      = PBKDF2-HMAC-SHA256(passcode as u32 LE, salt, iterations, 2 * WS_LENGTH)
//! w0, w1  = ws[..WS_LENGTH] mod n, ws[WS_LENGTH..] mod n
//! L       = w1 · G
//! verifier = w0 (32 B, big-endian) || L (65 B, uncompressed)
//! ```

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::base64::{base64_decode, base64_encode};
use crate::curve::{PaseCurve, P256};
use crate::error::SetupError;
use crate::types::{POINT_LENGTH, VERIFIER_LENGTH, W0_LENGTH};

/// Derive the raw verifier bytes `w0 || L` over any [`PaseCurve`].
///
/// The salt length is not checked here; callers keep it within 8..=16 bytes.
pub fn derive_verifier_bytes_with<C: PaseCurve>(
    passcode: u32,
    salt: &[u8],
    iterations: u32,
) -> Result<Vec<u8>, SetupError> {
    if iterations == 0 {
        return Err(SetupError::InvalidIterations(iterations));
    }
    tracing::debug!(iterations, salt_len = salt.len(), "deriving PASE verifier");

    let mut ws = Zeroizing::new(vec![0u8; 2 * C::WS_LENGTH]);
    pbkdf2_hmac::<Sha256>(&passcode.to_le_bytes(), salt, iterations, ws.as_mut_slice());

    let (w0_bytes, w1_bytes) = ws.split_at(C::WS_LENGTH);
    let w0 = C::reduce_be_bytes(w0_bytes);
    let w1 = C::reduce_be_bytes(w1_bytes);

    let mut verifier = C::encode_scalar(&w0);
    verifier.extend_from_slice(&C::mul_base_uncompressed(&w1)?);
    Ok(verifier)
}

/// Derive a P-256 PASE verifier and return it base64-encoded.
pub fn derive_verifier(passcode: u32, salt: &[u8], iterations: u32) -> Result<String, SetupError> {
    PaseVerifier::derive(passcode, salt, iterations).map(|v| v.to_base64())
}

/// A P-256 PASE verifier: the scalar `w0` and the point `L = w1 · G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaseVerifier {
    w0: [u8; W0_LENGTH],
    l: [u8; POINT_LENGTH],
}

impl PaseVerifier {
    /// Derive the verifier for `passcode` from `salt` and `iterations`.
    pub fn derive(passcode: u32, salt: &[u8], iterations: u32) -> Result<Self, SetupError> {
        let bytes = derive_verifier_bytes_with::<P256>(passcode, salt, iterations)?;
        Self::from_parts(&bytes)
    }

    /// Parse a raw 97-byte verifier, checking that `L` is on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SetupError> {
        let verifier = Self::from_parts(bytes)?;
        P256::check_uncompressed_point(&verifier.l)?;
        Ok(verifier)
    }

    /// Parse a base64-encoded verifier.
    pub fn from_base64(s: &str) -> Result<Self, SetupError> {
        Self::from_bytes(&base64_decode(s)?)
    }

    fn from_parts(bytes: &[u8]) -> Result<Self, SetupError> {
        if bytes.len() != VERIFIER_LENGTH {
            return Err(SetupError::InvalidVerifierLength {
                expected: VERIFIER_LENGTH,
                got: bytes.len(),
            });
        }
        let mut w0 = [0u8; W0_LENGTH];
        let mut l = [0u8; POINT_LENGTH];
        w0.copy_from_slice(&bytes[..W0_LENGTH]);
        l.copy_from_slice(&bytes[W0_LENGTH..]);
        Ok(Self { w0, l })
    }

    pub fn w0(&self) -> &[u8; W0_LENGTH] {
        &self.w0
    }

    pub fn l(&self) -> &[u8; POINT_LENGTH] {
        &self.l
    }

    /// `w0 || L`, 97 bytes.
    pub fn to_bytes(&self) -> [u8; VERIFIER_LENGTH] {
        let mut out = [0u8; VERIFIER_LENGTH];
        out[..W0_LENGTH].copy_from_slice(&self.w0);
        out[W0_LENGTH..].copy_from_slice(&self.l);
        out
    }

    pub fn to_base64(&self) -> String {
        base64_encode(&self.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &[u8] = b"sample_salt_bytes";

    #[test]
    fn deterministic() {
        let a = derive_verifier(11_223_344, SALT, 1122).unwrap();
        let b = derive_verifier(11_223_344, SALT, 1122).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decodes_to_97_bytes() {
        let verifier = derive_verifier(20_202_021, b"12345678", 1000).unwrap();
        let raw = base64_decode(&verifier).unwrap();
        assert_eq!(raw.len(), 97);
        assert_eq!(raw[32], 0x04);
    }

    #[test]
    fn different_passcodes_different_verifiers() {
        let a = derive_verifier(11_223_344, SALT, 1000).unwrap();
        let b = derive_verifier(11_223_345, SALT, 1000).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_salts_different_verifiers() {
        let a = derive_verifier(11_223_344, b"salt-aaaa", 1000).unwrap();
        let b = derive_verifier(11_223_344, b"salt-bbbb", 1000).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_iterations_different_verifiers() {
        let a = derive_verifier(11_223_344, SALT, 1000).unwrap();
        let b = derive_verifier(11_223_344, SALT, 1001).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(matches!(
            derive_verifier(11_223_344, SALT, 0),
            Err(SetupError::InvalidIterations(0))
        ));
    }

    #[test]
    fn one_iteration_is_accepted() {
        assert!(derive_verifier(11_223_344, SALT, 1).is_ok());
    }

    #[test]
    fn salt_length_is_not_enforced() {
        assert!(derive_verifier(11_223_344, b"", 1).is_ok());
        assert!(derive_verifier(11_223_344, &[0u8; 64], 1).is_ok());
    }

    #[test]
    fn base64_round_trip_preserves_parts() {
        let verifier = PaseVerifier::derive(11_223_344, SALT, 1122).unwrap();
        let parsed = PaseVerifier::from_base64(&verifier.to_base64()).unwrap();
        assert_eq!(parsed, verifier);
        assert_eq!(parsed.l()[0], 0x04);
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert!(matches!(
            PaseVerifier::from_bytes(&[0u8; 96]),
            Err(SetupError::InvalidVerifierLength {
                expected: 97,
                got: 96
            })
        ));
    }

    #[test]
    fn from_bytes_rejects_point_off_curve() {
        let mut raw = PaseVerifier::derive(11_223_344, SALT, 10).unwrap().to_bytes();
        raw[96] ^= 0x01;
        assert!(matches!(
            PaseVerifier::from_bytes(&raw),
            Err(SetupError::InvalidPoint(_))
        ));
    }
}
