// src/bin/txn_vault.rs
//! txn-vault: command-line front end for the encrypted transaction vault
//!
//! Usage:
//!   txn-vault encrypt <party-id> <json>
//!   txn-vault decrypt <id>
//!   txn-vault fetch <id>
//!   txn-vault list [party-id]
//!   txn-vault delete <id>
//!   txn-vault export <path>

use anyhow::{bail, Context, Result};
use encrypted_txn_vault::{export_records_to_json, Config, TxnVault};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: txn-vault <encrypt <party-id> <json> | decrypt <id> | fetch <id> | list [party-id] | delete <id> | export <path>>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    // Master key problems are fatal here, before any record is touched
    let config = Config::load().context("failed to load configuration")?;
    let vault = TxnVault::open(&config).context("failed to open vault")?;

    match (command.as_str(), &args[1..]) {
        ("encrypt", [party_id, json]) => {
            let payload: serde_json::Value =
                serde_json::from_str(json).context("payload is not valid JSON")?;
            let summary = vault.encrypt(party_id, &payload)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ("decrypt", [id]) => {
            let decoded = vault.decrypt(id)?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
        ("fetch", [id]) => {
            let record = vault.fetch(id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ("list", rest) if rest.len() <= 1 => {
            let summaries = vault.list(rest.first().map(String::as_str))?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        ("delete", [id]) => {
            if vault.delete(id)? {
                info!("deleted {id}");
            } else {
                bail!("record not found: {id}");
            }
        }
        ("export", [path]) => {
            let count = export_records_to_json(vault.connection(), path)?;
            info!("exported {count} record(s) → {path}");
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
