//! `matter-setup`: generate or inspect Matter onboarding codes.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use matter_setup::{
    base64_decode, generate_discriminator, generate_iterations, generate_passcode, generate_salt,
    is_valid_discriminator, is_valid_passcode, is_valid_salt_length, ManualPairingCode,
    SetupPayload, MAX_ITERATIONS, MAX_SALT_LENGTH, MIN_ITERATIONS, MIN_SALT_LENGTH,
};
use tracing_subscriber::EnvFilter;

use crate::config::SetupConfig;

#[derive(Parser)]
#[command(name = "matter-setup", version, about = "Matter onboarding code generator")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "MATTER_SETUP_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "MATTER_SETUP_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive a PASE verifier and manual pairing code.
    Generate(GenerateArgs),
    /// Decode and check a manual pairing code.
    Decode {
        /// 11- or 21-digit code; dashes and spaces are ignored.
        code: String,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Setup passcode. Generated when omitted.
    #[arg(long, env = "MATTER_SETUP_PASSCODE")]
    passcode: Option<u32>,

    /// 12-bit discriminator. Generated when omitted.
    #[arg(long, env = "MATTER_SETUP_DISCRIMINATOR", value_parser = parse_u16)]
    discriminator: Option<u16>,

    /// Base64 salt (8 to 16 bytes once decoded). Generated when omitted.
    #[arg(long, env = "MATTER_SETUP_SALT")]
    salt: Option<String>,

    /// PBKDF2 iteration count.
    #[arg(long, env = "MATTER_SETUP_ITERATIONS")]
    iterations: Option<u32>,

    /// Vendor id (decimal or 0x-prefixed hex).
    #[arg(long, env = "MATTER_SETUP_VENDOR_ID", value_parser = parse_u16)]
    vendor_id: Option<u16>,

    /// Product id (decimal or 0x-prefixed hex).
    #[arg(long, env = "MATTER_SETUP_PRODUCT_ID", value_parser = parse_u16)]
    product_id: Option<u16>,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| e.to_string())
}

impl GenerateArgs {
    /// Merge flags over the config file, validate what the caller supplied
    /// and generate whatever is missing.
    fn into_payload(self, config: &SetupConfig) -> anyhow::Result<SetupPayload> {
        let passcode = match self.passcode {
            Some(p) if !is_valid_passcode(p) => bail!("invalid passcode: {p}"),
            Some(p) => p,
            None => generate_passcode()?,
        };

        let discriminator = match self.discriminator {
            Some(d) if !is_valid_discriminator(d) => {
                bail!("invalid discriminator: {d} (must be at most 4095)")
            }
            Some(d) => d,
            None => generate_discriminator()?,
        };

        let salt = match self.salt {
            Some(salt) => {
                let len = base64_decode(&salt).context("decoding salt")?.len();
                if !is_valid_salt_length(len) {
                    bail!(
                        "invalid salt length: {len} bytes (must be {MIN_SALT_LENGTH} to {MAX_SALT_LENGTH})"
                    );
                }
                salt
            }
            None => generate_salt()?,
        };

        let iterations = match self.iterations.or(config.iterations) {
            Some(0) => bail!("iterations must be at least 1"),
            Some(n) => {
                if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&n) {
                    tracing::warn!(
                        iterations = n,
                        "iteration count outside {MIN_ITERATIONS}..={MAX_ITERATIONS}"
                    );
                }
                n
            }
            None => generate_iterations()?,
        };

        Ok(SetupPayload {
            passcode,
            discriminator,
            vendor_id: self.vendor_id.unwrap_or(config.vendor_id),
            product_id: self.product_id.unwrap_or(config.product_id),
            salt,
            iterations,
        })
    }
}

/// Initialize the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(args: GenerateArgs, config: &SetupConfig, json: bool) -> anyhow::Result<()> {
    let payload = args.into_payload(config)?;
    let codes = payload.codes().context("deriving onboarding codes")?;
    tracing::info!(
        discriminator = payload.discriminator,
        iterations = payload.iterations,
        "derived onboarding codes"
    );

    if json {
        let out = serde_json::json!({ "inputs": payload, "outputs": codes });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Inputs:");
    println!("Passcode: {:08}", payload.passcode);
    println!("Salt: {}", payload.salt);
    println!("Iterations: {}", payload.iterations);
    println!("Discriminator: {}", payload.discriminator);
    println!("Vendor ID: {}", payload.vendor_id);
    println!("Product ID: {}", payload.product_id);
    println!("-------------------");
    println!("Outputs:");
    println!("Verifier: {}", codes.verifier);
    println!("ManualPairingCode: {}", codes.manual_code);
    Ok(())
}

fn decode(code: &str, json: bool) -> anyhow::Result<()> {
    let parsed = ManualPairingCode::parse(code).context("decoding manual pairing code")?;

    if json {
        let out = serde_json::json!({
            "shortDiscriminator": parsed.short_discriminator,
            "passcode": parsed.passcode,
            "vendorId": parsed.vendor_id(),
            "productId": parsed.product_id(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Short discriminator: {}", parsed.short_discriminator);
    println!("Passcode: {:08}", parsed.passcode);
    if let Some((vid, pid)) = parsed.ids {
        println!("Vendor ID: {vid}");
        println!("Product ID: {pid}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => SetupConfig::from_toml_file(path)?,
        None => SetupConfig::default(),
    };

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let json = cli.json || config.json;
    match cli.command {
        Command::Generate(args) => generate(args, &config, json),
        Command::Decode { code } => decode(&code, json),
    }
}
