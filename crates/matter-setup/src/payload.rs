//! Onboarding inputs for one device and the codes derived from them.

use serde::{Deserialize, Serialize};

use crate::base64::base64_decode;
use crate::error::SetupError;
use crate::manual_code::encode_manual_code;
use crate::random::{generate_discriminator, generate_passcode, generate_salt};
use crate::verifier::derive_verifier;

/// Everything a commissioner needs to know about a device before pairing.
///
/// The salt is kept base64-encoded; the verifier is derived from its
/// decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPayload {
    pub passcode: u32,
    pub discriminator: u16,
    pub vendor_id: u16,
    pub product_id: u16,
    pub salt: String,
    pub iterations: u32,
}

/// The two public artifacts derived from a [`SetupPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupCodes {
    /// Base64 of `w0 || L`.
    pub verifier: String,
    pub manual_code: String,
}

impl SetupPayload {
    /// Draw a fresh passcode, discriminator and salt for a device.
    pub fn generate(vendor_id: u16, product_id: u16, iterations: u32) -> Result<Self, SetupError> {
        Ok(Self {
            passcode: generate_passcode()?,
            discriminator: generate_discriminator()?,
            vendor_id,
            product_id,
            salt: generate_salt()?,
            iterations,
        })
    }

    pub fn salt_bytes(&self) -> Result<Vec<u8>, SetupError> {
        base64_decode(&self.salt)
    }

    pub fn verifier(&self) -> Result<String, SetupError> {
        derive_verifier(self.passcode, &self.salt_bytes()?, self.iterations)
    }

    pub fn manual_code(&self) -> String {
        encode_manual_code(
            self.discriminator,
            self.passcode,
            self.vendor_id,
            self.product_id,
        )
    }

    pub fn codes(&self) -> Result<SetupCodes, SetupError> {
        Ok(SetupCodes {
            verifier: self.verifier()?,
            manual_code: self.manual_code(),
        })
    }
}
