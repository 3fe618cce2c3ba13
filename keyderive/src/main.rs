//! key-inspect: print the address and public key derived from a mnemonic.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use keyderive::{mnemonic_to_address, DerivationPath, DerivedAddress, Network};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "key-inspect", about = "Derive a P2PKH address from a BIP-39 mnemonic")]
#[command(version)]
struct Cli {
    /// Mnemonic phrase (12, 15, 18, 21 or 24 English words).
    #[arg(long, env = "KEYDERIVE_MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    /// Optional BIP-39 passphrase.
    #[arg(long, default_value = "", env = "KEYDERIVE_PASSPHRASE", hide_env_values = true)]
    passphrase: String,

    /// Network: "mainnet", "testnet" or "regtest".
    #[arg(long, default_value = "mainnet", env = "KEYDERIVE_NETWORK")]
    network: Network,

    /// Derivation path, e.g. "m/44'/0'/0'/0/0". Defaults to the coin type, hardened.
    #[arg(long, env = "KEYDERIVE_PATH")]
    path: Option<DerivationPath>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn render(derived: &DerivedAddress, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(format!(
            "Bitcoin Address: {}\nPublic Key: {}",
            derived.address, derived.public_key_hex
        )),
        Format::Json => {
            serde_json::to_string_pretty(derived).context("failed to encode JSON output")
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let mnemonic = Zeroizing::new(cli.mnemonic);
    let passphrase = Zeroizing::new(cli.passphrase);
    tracing::debug!(network = %cli.network, path = ?cli.path.as_ref().map(ToString::to_string), "deriving");
    let derived = mnemonic_to_address(
        &mnemonic,
        &passphrase,
        cli.network.params(),
        cli.path.as_ref(),
    )
    .map_err(|e| {
        let stage = e.stage();
        anyhow::Error::new(e).context(format!("{stage} stage failed"))
    })?;
    render(&derived, cli.format)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    println!("{}", run(cli)?);
    Ok(())
}
