//! Elliptic-curve operations needed to build a PASE verifier.
//!
//! The verifier only needs the base point, the group order, scalar
//! multiplication and SEC1 point encoding. [`PaseCurve`] exposes exactly
//! those so the backing library stays swappable; [`P256`] implements it
//! with the `p256` crate.

use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::PrimeField;
use p256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};

use crate::error::SetupError;

/// Prime-order curve used for verifier generation.
pub trait PaseCurve {
    type Scalar;

    /// Byte length of a base field element.
    const FIELD_LENGTH: usize;

    /// Length of each PBKDF2 output half: the field length plus 64 bits of
    /// headroom so the reduction modulo the group order is close to uniform.
    const WS_LENGTH: usize = Self::FIELD_LENGTH + 8;

    /// Interpret `bytes` as a big-endian integer of any length and reduce
    /// it modulo the group order.
    fn reduce_be_bytes(bytes: &[u8]) -> Self::Scalar;

    /// Fixed-width big-endian encoding of a scalar (`FIELD_LENGTH` bytes).
    fn encode_scalar(scalar: &Self::Scalar) -> Vec<u8>;

    /// `scalar · G`, encoded as an uncompressed SEC1 point.
    ///
    /// Fails for the zero scalar, whose product is the point at infinity.
    fn mul_base_uncompressed(scalar: &Self::Scalar) -> Result<Vec<u8>, SetupError>;

    /// Check that `bytes` is an uncompressed encoding of a point on the curve.
    fn check_uncompressed_point(bytes: &[u8]) -> Result<(), SetupError>;
}

/// NIST P-256 (secp256r1).
#[derive(Debug, Clone, Copy, Default)]
pub struct P256;

impl PaseCurve for P256 {
    type Scalar = Scalar;

    const FIELD_LENGTH: usize = 32;

    fn reduce_be_bytes(bytes: &[u8]) -> Scalar {
        // Horner's rule in the scalar field: every step stays reduced.
        let radix = Scalar::from(256u64);
        bytes.iter().fold(Scalar::ZERO, |acc, &byte| {
            acc * radix + Scalar::from(u64::from(byte))
        })
    }

    fn encode_scalar(scalar: &Scalar) -> Vec<u8> {
        scalar.to_repr().to_vec()
    }

    fn mul_base_uncompressed(scalar: &Scalar) -> Result<Vec<u8>, SetupError> {
        if *scalar == Scalar::ZERO {
            return Err(SetupError::DegenerateScalar);
        }
        let point = (ProjectivePoint::GENERATOR * *scalar).to_affine();
        Ok(point.to_encoded_point(false).as_bytes().to_vec())
    }

    fn check_uncompressed_point(bytes: &[u8]) -> Result<(), SetupError> {
        if bytes.first() != Some(&0x04) {
            return Err(SetupError::InvalidPoint(
                "expected uncompressed 0x04 prefix".to_string(),
            ));
        }
        let encoded =
            EncodedPoint::from_bytes(bytes).map_err(|e| SetupError::InvalidPoint(e.to_string()))?;
        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .map(|_| ())
            .ok_or_else(|| SetupError::InvalidPoint("not on curve".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_X: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const GENERATOR_Y: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";
    const ORDER: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

    #[test]
    fn ws_length_adds_64_bits_of_headroom() {
        assert_eq!(<P256 as PaseCurve>::WS_LENGTH, 40);
        assert_eq!(crate::types::WS_LENGTH, <P256 as PaseCurve>::WS_LENGTH);
    }

    #[test]
    fn one_times_base_is_generator() {
        let encoded = P256::mul_base_uncompressed(&Scalar::ONE).unwrap();
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], 0x04);
        assert_eq!(hex::encode(&encoded[1..33]), GENERATOR_X);
        assert_eq!(hex::encode(&encoded[33..]), GENERATOR_Y);
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(matches!(
            P256::mul_base_uncompressed(&Scalar::ZERO),
            Err(SetupError::DegenerateScalar)
        ));
    }

    #[test]
    fn order_reduces_to_zero() {
        let order = hex::decode(ORDER).unwrap();
        assert_eq!(P256::reduce_be_bytes(&order), Scalar::ZERO);
    }

    #[test]
    fn order_plus_one_reduces_to_one() {
        let mut bytes = vec![0u8; 8];
        bytes.extend(hex::decode(ORDER).unwrap());
        *bytes.last_mut().unwrap() += 1;
        assert_eq!(bytes.len(), 40);
        assert_eq!(P256::reduce_be_bytes(&bytes), Scalar::ONE);
    }

    #[test]
    fn small_values_encode_left_padded() {
        let scalar = P256::reduce_be_bytes(&[0x01, 0x02]);
        let encoded = P256::encode_scalar(&scalar);
        assert_eq!(encoded.len(), 32);
        assert!(encoded[..30].iter().all(|&b| b == 0));
        assert_eq!(&encoded[30..], &[0x01, 0x02]);
    }

    #[test]
    fn leading_zero_bytes_do_not_change_value() {
        let short = P256::reduce_be_bytes(&[0xAB, 0xCD]);
        let long = P256::reduce_be_bytes(&[0, 0, 0, 0, 0xAB, 0xCD]);
        assert_eq!(short, long);
    }

    #[test]
    fn accepts_generator_point() {
        let encoded = P256::mul_base_uncompressed(&Scalar::ONE).unwrap();
        assert!(P256::check_uncompressed_point(&encoded).is_ok());
    }

    #[test]
    fn rejects_off_curve_point() {
        let mut encoded = P256::mul_base_uncompressed(&Scalar::ONE).unwrap();
        encoded[64] ^= 0x01;
        assert!(P256::check_uncompressed_point(&encoded).is_err());
    }

    #[test]
    fn rejects_compressed_point() {
        let encoded = P256::mul_base_uncompressed(&Scalar::ONE).unwrap();
        let mut compressed = vec![0x02 | (encoded[64] & 1)];
        compressed.extend_from_slice(&encoded[1..33]);
        assert!(P256::check_uncompressed_point(&compressed).is_err());
    }
}
