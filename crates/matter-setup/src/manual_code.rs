//! Manual pairing code encoding and decoding.
//!
//! Layout of the decimal payload, most significant chunk first:
//!
//! | chunk | digits | bits                                                   |
//! |-------|--------|--------------------------------------------------------|
//! | 1     | 1      | version (1) · VID/PID present (1) · short disc. hi (2)  |
//! | 2     | 5      | short disc. lo (2) · passcode bits 0..14                |
//! | 3     | 4      | passcode bits 14..27                                   |
//! | 4     | 5      | vendor id (only when VID/PID present)                  |
//! | 5     | 5      | product id (only when VID/PID present)                 |
//!
//! followed by one Verhoeff check digit. With VID/PID present the code is
//! 21 digits, otherwise 11.

use std::fmt;

use crate::error::SetupError;
use crate::verhoeff::check_digit_value;

/// Only version 0 is defined.
const VERSION: u8 = 0;

/// Length of a code that carries vendor and product ids.
pub const LONG_CODE_LENGTH: usize = 21;

/// Length of a code without vendor and product ids.
pub const SHORT_CODE_LENGTH: usize = 11;

const PASSCODE_LOW_BITS: u32 = 14;
const PASSCODE_LOW_MASK: u32 = (1 << PASSCODE_LOW_BITS) - 1;

/// Encode a 21-digit manual pairing code carrying vendor and product ids.
///
/// Inputs are not range-checked. A discriminator wider than 12 bits or a
/// passcode wider than 27 bits widens the affected chunk instead of being
/// clamped.
pub fn encode_manual_code(discriminator: u16, passcode: u32, vid: u16, pid: u16) -> String {
    ManualPairingCode::with_ids(discriminator, passcode, vid, pid).to_string()
}

/// The fields carried by a manual pairing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualPairingCode {
    /// Upper 4 bits of the 12-bit discriminator.
    pub short_discriminator: u8,
    pub passcode: u32,
    /// Vendor and product id, present in 21-digit codes only.
    pub ids: Option<(u16, u16)>,
}

impl ManualPairingCode {
    /// Code carrying vendor and product ids (21 digits).
    pub fn with_ids(discriminator: u16, passcode: u32, vid: u16, pid: u16) -> Self {
        Self {
            short_discriminator: (discriminator >> 8) as u8,
            passcode,
            ids: Some((vid, pid)),
        }
    }

    /// Code without vendor and product ids (11 digits).
    pub fn without_ids(discriminator: u16, passcode: u32) -> Self {
        Self {
            short_discriminator: (discriminator >> 8) as u8,
            passcode,
            ids: None,
        }
    }

    pub fn vendor_id(&self) -> Option<u16> {
        self.ids.map(|(vid, _)| vid)
    }

    pub fn product_id(&self) -> Option<u16> {
        self.ids.map(|(_, pid)| pid)
    }

    /// Decimal payload without the check digit.
    fn payload(&self) -> String {
        let short = u32::from(self.short_discriminator);
        let vid_pid_present = u32::from(self.ids.is_some());
        let chunk1 = (u32::from(VERSION) << 3) | (vid_pid_present << 2) | (short >> 2);
        let chunk2 = ((short & 0x3) << PASSCODE_LOW_BITS) | (self.passcode & PASSCODE_LOW_MASK);
        let chunk3 = self.passcode >> PASSCODE_LOW_BITS;

        let mut payload = format!("{chunk1}{chunk2:05}{chunk3:04}");
        if let Some((vid, pid)) = self.ids {
            payload.push_str(&format!("{vid:05}{pid:05}"));
        }
        payload
    }

    /// Parse a manual pairing code, verifying its check digit.
    ///
    /// Dashes and spaces used for display grouping are ignored.
    pub fn parse(code: &str) -> Result<Self, SetupError> {
        let digits: Vec<u8> = code
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .map(|ch| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(SetupError::InvalidDigit(ch))
            })
            .collect::<Result<_, _>>()?;

        if digits.len() != SHORT_CODE_LENGTH && digits.len() != LONG_CODE_LENGTH {
            return Err(SetupError::InvalidManualCodeLength { got: digits.len() });
        }

        let (&check, payload) = digits
            .split_last()
            .ok_or(SetupError::InvalidManualCodeLength { got: 0 })?;
        let expected = check_digit_value(payload);
        if expected != check {
            return Err(SetupError::ChecksumMismatch {
                expected: char::from(b'0' + expected),
                got: char::from(b'0' + check),
            });
        }

        let chunk1 = payload[0];
        let version = chunk1 >> 3;
        if version != VERSION {
            return Err(SetupError::UnsupportedVersion(version));
        }
        let vid_pid_present = (chunk1 >> 2) & 1 == 1;
        let expected_length = if vid_pid_present {
            LONG_CODE_LENGTH
        } else {
            SHORT_CODE_LENGTH
        };
        if digits.len() != expected_length {
            return Err(SetupError::InvalidManualCode(format!(
                "VID/PID flag is {} but code has {} digits",
                u8::from(vid_pid_present),
                digits.len()
            )));
        }

        let chunk2 = decimal(&payload[1..6]);
        let chunk3 = decimal(&payload[6..10]);
        if chunk2 > u32::from(u16::MAX) {
            return Err(SetupError::InvalidManualCode(format!(
                "chunk 2 out of range: {chunk2}"
            )));
        }

        let short_discriminator = ((chunk1 & 0x3) << 2) | (chunk2 >> PASSCODE_LOW_BITS) as u8;
        let passcode = (chunk3 << PASSCODE_LOW_BITS) | (chunk2 & PASSCODE_LOW_MASK);

        let ids = if vid_pid_present {
            Some((
                decimal_u16(&payload[10..15], "vendor id")?,
                decimal_u16(&payload[15..20], "product id")?,
            ))
        } else {
            None
        };

        Ok(Self {
            short_discriminator,
            passcode,
            ids,
        })
    }
}

fn decimal(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d))
}

fn decimal_u16(digits: &[u8], field: &str) -> Result<u16, SetupError> {
    let value = decimal(digits);
    u16::try_from(value)
        .map_err(|_| SetupError::InvalidManualCode(format!("{field} out of range: {value}")))
}

impl fmt::Display for ManualPairingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = self.payload();
        let values: Vec<u8> = payload.bytes().map(|b| b - b'0').collect();
        let check = char::from(b'0' + check_digit_value(&values));
        write!(f, "{payload}{check}")
    }
}
