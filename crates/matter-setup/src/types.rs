use crate::curve::{PaseCurve, P256};

/// Byte length of a P-256 field element and of an encoded scalar.
pub const FIELD_LENGTH: usize = <P256 as PaseCurve>::FIELD_LENGTH;

/// Length of each P-256 PBKDF2 output half.
pub const WS_LENGTH: usize = <P256 as PaseCurve>::WS_LENGTH;

/// Encoded length of w0 (fixed-width big-endian).
pub const W0_LENGTH: usize = FIELD_LENGTH;

/// Encoded length of L in uncompressed SEC1 form: 0x04 || X || Y.
pub const POINT_LENGTH: usize = 1 + 2 * FIELD_LENGTH;

/// Raw verifier length: w0 || L.
pub const VERIFIER_LENGTH: usize = W0_LENGTH + POINT_LENGTH;

/// Salt length bounds in bytes (inclusive).
pub const MIN_SALT_LENGTH: usize = 8;
pub const MAX_SALT_LENGTH: usize = 16;

/// PBKDF2 iteration bounds used when generating a fresh iteration count.
pub const MIN_ITERATIONS: u32 = 1000;
pub const MAX_ITERATIONS: u32 = 100_000;

/// Setup passcode bounds (inclusive).
pub const MIN_PASSCODE: u32 = 1;
pub const MAX_PASSCODE: u32 = 99_999_998;

/// Largest 12-bit discriminator.
pub const MAX_DISCRIMINATOR: u16 = 0x0FFF;

/// Passcode returned when the random source keeps producing invalid values.
pub const FALLBACK_PASSCODE: u32 = 20_202_021;

/// Attempts made by `generate_passcode` before falling back.
pub const MAX_PASSCODE_ATTEMPTS: usize = 100;

/// Passcodes that are trivially guessable and must never be issued.
pub const INVALID_PASSCODES: [u32; 12] = [
    0, 11_111_111, 22_222_222, 33_333_333, 44_444_444, 55_555_555, 66_666_666, 77_777_777,
    88_888_888, 99_999_999, 12_345_678, 87_654_321,
];

/// Whether `passcode` may be issued to a device.
pub fn is_valid_passcode(passcode: u32) -> bool {
    (MIN_PASSCODE..=MAX_PASSCODE).contains(&passcode) && !INVALID_PASSCODES.contains(&passcode)
}

/// Whether `discriminator` fits in 12 bits.
pub fn is_valid_discriminator(discriminator: u16) -> bool {
    discriminator <= MAX_DISCRIMINATOR
}

/// Whether a salt of `len` bytes is within the accepted bounds.
pub fn is_valid_salt_length(len: usize) -> bool {
    (MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_is_97_bytes() {
        assert_eq!(WS_LENGTH, 40);
        assert_eq!(POINT_LENGTH, 65);
        assert_eq!(VERIFIER_LENGTH, 97);
    }

    #[test]
    fn rejects_every_blacklisted_passcode() {
        for passcode in INVALID_PASSCODES {
            assert!(!is_valid_passcode(passcode), "{passcode} accepted");
        }
    }

    #[test]
    fn passcode_bounds() {
        assert!(is_valid_passcode(1));
        assert!(is_valid_passcode(20_202_021));
        assert!(is_valid_passcode(99_999_998));
        assert!(!is_valid_passcode(99_999_999));
        assert!(!is_valid_passcode(100_000_000));
    }

    #[test]
    fn discriminator_bounds() {
        assert!(is_valid_discriminator(0));
        assert!(is_valid_discriminator(4095));
        assert!(!is_valid_discriminator(4096));
    }

    #[test]
    fn salt_length_bounds() {
        assert!(!is_valid_salt_length(7));
        assert!(is_valid_salt_length(8));
        assert!(is_valid_salt_length(16));
        assert!(!is_valid_salt_length(17));
    }
}
