//! cbc: run operations against a local CBC token ledger.

mod config;
mod host;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use cbc_contract::{Arg, Invocation, SignedInvocation, Trigger};
use cbc_crypto::{derive_account, keypair_from_seed, parse_seed};
use cbc_types::KeyPair;
use cbc_utils::LogFormat;

use crate::config::LedgerConfig;
use crate::host::Host;

#[derive(Parser)]
#[command(name = "cbc", about = "CBC token ledger")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "CBC_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "CBC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CBC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CBC_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Derive the account id and public key for a 32-byte hex seed.
    Account { seed: String },

    /// Run one contract operation, e.g. `invoke transfer 0x.. 0x.. 100`.
    Invoke {
        operation: String,

        /// Arguments: `0x`-prefixed hex for accounts, decimal for amounts.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,

        /// Hex seed of a witness; repeat for several.
        #[arg(long = "signer")]
        signers: Vec<String>,

        /// Run the verification trigger instead of the operation.
        #[arg(long)]
        verification: bool,
    },

    /// Print supply, holders and whether balances add up to the supply.
    Inspect,
}

#[derive(Serialize)]
struct AccountReport {
    account: String,
    public_key: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    cbc_utils::init_logging(config.log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Account { seed } => {
            let kp = keypair(&seed)?;
            print_json(&AccountReport {
                account: derive_account(&kp.public).to_string(),
                public_key: format!("0x{}", hex::encode(kp.public.as_bytes())),
            })?;
        }
        Command::Invoke {
            operation,
            args,
            signers,
            verification,
        } => {
            let args = args
                .iter()
                .map(|a| a.parse::<Arg>())
                .collect::<Result<Vec<_>, _>>()?;
            let mut invocation = Invocation::application(operation, args);
            if verification {
                invocation.trigger = Trigger::Verification;
            }
            let keys = signers
                .iter()
                .map(|s| keypair(s))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let key_refs: Vec<&KeyPair> = keys.iter().collect();
            let signed = SignedInvocation::sign(invocation, &key_refs);

            let host = Host::open(&config)?;
            print_json(&host.invoke(&signed)?)?;
        }
        Command::Inspect => {
            let host = Host::open(&config)?;
            let ledger = host.contract().ledger();
            let snapshot = ledger.snapshot()?;
            if !snapshot.is_consistent() {
                tracing::warn!(
                    supply = %snapshot.total_supply,
                    circulating = %snapshot.circulating,
                    "balances do not add up to the supply"
                );
            }
            print_json(&serde_json::json!({
                "initialized": ledger.is_initialized()?,
                "consistent": snapshot.is_consistent(),
                "snapshot": snapshot,
            }))?;
        }
    }

    Ok(())
}

fn keypair(seed: &str) -> anyhow::Result<KeyPair> {
    let seed = parse_seed(seed).context("signer seed")?;
    Ok(keypair_from_seed(&seed))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
