//! CLI configuration with TOML file support.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Settings that may come from a config file. Command-line flags and
/// environment variables override every field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Vendor id encoded into the manual pairing code.
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,

    /// Product id encoded into the manual pairing code.
    #[serde(default = "default_product_id")]
    pub product_id: u16,

    /// PBKDF2 iteration count. Drawn at random when unset.
    #[serde(default)]
    pub iterations: Option<u32>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON instead of text.
    #[serde(default)]
    pub json: bool,
}

fn default_vendor_id() -> u16 {
    12340
}

fn default_product_id() -> u16 {
    56780
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl SetupConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            product_id: default_product_id(),
            iterations: None,
            log_level: default_log_level(),
            json: false,
        }
    }
}
