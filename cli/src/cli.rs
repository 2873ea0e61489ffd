//! # CLI Interface
//!
//! Defines the command-line argument structure for `txrep` using `clap`
//! derive.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use txrep::config::Network;

use crate::logging::LogFormat;

/// Convert transaction envelopes between base64 XDR and txrep text.
#[derive(Parser, Debug)]
#[command(name = "txrep", about = "Transaction envelope ⇄ txrep text", version, propagate_version = true)]
pub struct TxRepCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, env = "TXREP_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Base64 XDR envelope → txrep text.
    ToText(InputArgs),
    /// txrep text → base64 XDR envelope.
    FromText(InputArgs),
    /// Print the hex transaction hash.
    Hash(HashArgs),
    /// Check whether an account signed the envelope.
    Verify(VerifyArgs),
    /// Print the decoded envelope as JSON.
    Json(JsonArgs),
    /// Print version information and exit.
    Version,
}

/// Where to read the document from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input file; `-` or omitted reads stdin.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,
}

/// Which network's passphrase to hash with.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// Well-known network: public (or mainnet), testnet, futurenet.
    #[arg(long, short = 'n', default_value = "public")]
    pub network: Network,

    /// Explicit passphrase; overrides `--network`.
    #[arg(long, env = "TXREP_NETWORK_PASSPHRASE")]
    pub passphrase: Option<String>,
}

impl NetworkArgs {
    /// The selected network, [`Network::Custom`] when a passphrase is given.
    pub fn resolve(&self) -> Network {
        match &self.passphrase {
            Some(passphrase) => Network::Custom(passphrase.clone()),
            None => self.network.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Input is base64 XDR rather than txrep text.
    #[arg(long)]
    pub xdr: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Account (`G…`) whose signature to look for.
    #[arg(long, short = 'a')]
    pub account: String,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Input is base64 XDR rather than txrep text.
    #[arg(long)]
    pub xdr: bool,
}

#[derive(Args, Debug)]
pub struct JsonArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Input is base64 XDR rather than txrep text.
    #[arg(long)]
    pub xdr: bool,
}
