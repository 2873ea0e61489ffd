// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txrep
//!
//! Entry point for the `txrep` binary. Parses CLI arguments, initializes
//! logging and runs one conversion.
//!
//! - `to-text`   — base64 XDR → txrep text
//! - `from-text` — txrep text → base64 XDR
//! - `hash`      — hex transaction hash for a network
//! - `verify`    — check an account's signature on the envelope
//! - `json`      — decoded envelope as JSON
//! - `version`   — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use txrep::model::AccountId;
use txrep::TransactionEnvelope;

use cli::{Commands, InputArgs, TxRepCli};

fn main() -> Result<()> {
    let cli = TxRepCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::ToText(args) => {
            let input = read_input(&args)?;
            let text = txrep::to_text(&input).context("failed to convert XDR to txrep")?;
            print!("{}", text);
        }
        Commands::FromText(args) => {
            let input = read_input(&args)?;
            let base64 = txrep::from_text(&input).context("failed to convert txrep to XDR")?;
            println!("{}", base64);
        }
        Commands::Hash(args) => {
            let envelope = load_envelope(&args.input, args.xdr)?;
            let network = args.network.resolve();
            let hash = txrep::transaction_hash(&envelope, network.passphrase())
                .context("failed to hash transaction")?;
            tracing::info!(%network, "transaction hashed");
            println!("{}", hex::encode(hash));
        }
        Commands::Verify(args) => {
            let account = AccountId::from_strkey(&args.account)
                .with_context(|| format!("invalid account `{}`", args.account))?;
            let envelope = load_envelope(&args.input, args.xdr)?;
            let network = args.network.resolve();
            if !txrep::verify_signature(&envelope, network.passphrase(), &account) {
                bail!("no valid signature from {}", account);
            }
            println!("{}: signature verified", account);
        }
        Commands::Json(args) => {
            let envelope = load_envelope(&args.input, args.xdr)?;
            let json = serde_json::to_string_pretty(&envelope)
                .context("failed to serialize envelope")?;
            println!("{}", json);
        }
        Commands::Version => print_version(),
    }
    Ok(())
}

/// Reads the whole input document from a file, or stdin for `-`/none.
fn read_input(args: &InputArgs) -> Result<String> {
    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Decodes the input as base64 XDR (`xdr`) or txrep text.
fn load_envelope(args: &InputArgs, xdr: bool) -> Result<TransactionEnvelope> {
    let input = read_input(args)?;
    if xdr {
        txrep::from_xdr_base64(&input).context("failed to decode XDR envelope")
    } else {
        txrep::decode(&input).context("failed to decode txrep")
    }
}

fn print_version() {
    println!("txrep {}", env!("CARGO_PKG_VERSION"));
    println!("rustc {}", option_env!("RUSTC_VERSION").unwrap_or("unknown"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "type: ENVELOPE_TYPE_TX").expect("write");
        let args = InputArgs {
            input: Some(file.path().to_path_buf()),
        };
        assert_eq!(read_input(&args).unwrap(), "type: ENVELOPE_TYPE_TX\n");
    }

    #[test]
    fn missing_file_has_context() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = InputArgs {
            input: Some(dir.path().join("absent.txt")),
        };
        let err = read_input(&args).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
