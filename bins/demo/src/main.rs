//! Tally demo walkthrough.
//!
//! Bootstraps the default chart of accounts in an in-memory store, posts a
//! handful of transactions, and exports both snapshot variants.
//!
//! Usage: cargo run --bin demo [output-dir]

use std::path::PathBuf;

use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::ledger::{LedgerService, LedgerStore, MemoryStore};
use tally_export::{FlatExporter, SnapshotExporter, flatten};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let mut service = LedgerService::new(MemoryStore::new());
    service.bootstrap()?;
    info!(
        accounts = service.store().accounts().len(),
        "Chart of accounts ready"
    );

    service.add_money(dec!(100), "birthday gift", false)?;
    service.add_money(dec!(50), "sold old bike", true)?;
    service.spend_money(dec!(40), "snacks")?;
    info!(balance = %service.formatted_balance(), "Posted 3 transactions");

    let snapshot_path = output_dir.join("ledger_snapshot.db");
    SnapshotExporter::export(service.store(), &snapshot_path)?;
    info!(path = %snapshot_path.display(), "Wrote full snapshot");

    let flat_path = output_dir.join("transactions.db");
    let transactions = flatten(service.store());
    FlatExporter::export(&transactions, &flat_path)?;
    info!(
        path = %flat_path.display(),
        rows = transactions.len(),
        "Wrote flat snapshot"
    );

    println!("Current balance: {}", service.formatted_balance());
    Ok(())
}
