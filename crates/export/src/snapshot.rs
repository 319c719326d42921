//! Full double-entry snapshot export.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tally_core::ledger::LedgerStore;

use crate::error::ExportError;

const SCHEMA: &str = r"
    CREATE TABLE accounts (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        is_active INTEGER NOT NULL,
        created_at REAL NOT NULL,
        balance REAL NOT NULL
    );

    CREATE TABLE journal_entries (
        id TEXT PRIMARY KEY,
        date REAL NOT NULL,
        description TEXT NOT NULL,
        created_at REAL NOT NULL,
        is_balanced INTEGER NOT NULL,
        total_debits REAL NOT NULL,
        total_credits REAL NOT NULL
    );

    CREATE TABLE journal_lines (
        id TEXT PRIMARY KEY,
        entry_id TEXT NOT NULL,
        account_id TEXT NOT NULL,
        entry_type TEXT NOT NULL,
        amount REAL NOT NULL,
        FOREIGN KEY (entry_id) REFERENCES journal_entries(id),
        FOREIGN KEY (account_id) REFERENCES accounts(id)
    );
";

/// Exports the complete ledger graph as a point-in-time SQLite snapshot.
pub struct SnapshotExporter;

impl SnapshotExporter {
    /// Writes the snapshot to `path`, replacing any pre-existing file.
    ///
    /// Rows are populated from the full current account and entry lists;
    /// lines are derived by walking each entry's owned lines, so every
    /// exported line carries a valid `entry_id`/`account_id` pair. The
    /// export fails atomically: on any error the partially written file is
    /// removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] naming the failed phase.
    pub fn export<S: LedgerStore>(store: &S, path: &Path) -> Result<(), ExportError> {
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| ExportError::SnapshotCreationFailed(e.to_string()))?;
        }

        let result = Self::write_snapshot(store, path);
        if result.is_err() {
            let _ = fs::remove_file(path);
        }
        result
    }

    fn write_snapshot<S: LedgerStore>(store: &S, path: &Path) -> Result<(), ExportError> {
        let mut conn = Connection::open(path)
            .map_err(|e| ExportError::SnapshotCreationFailed(e.to_string()))?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| ExportError::SchemaFailed(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

        {
            let mut insert_account = tx
                .prepare(
                    "INSERT INTO accounts (id, name, type, is_active, created_at, balance)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

            for account in store.accounts() {
                let lines = store.lines_for_account(account.id);
                let balance = to_real(account.balance(&lines))?;
                insert_account
                    .execute((
                        account.id.to_string(),
                        &account.name,
                        account.account_type.as_str(),
                        i64::from(account.is_active),
                        epoch_seconds(account.created_at),
                        balance,
                    ))
                    .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;
            }

            let mut insert_entry = tx
                .prepare(
                    "INSERT INTO journal_entries
                     (id, date, description, created_at, is_balanced, total_debits, total_credits)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

            let mut insert_line = tx
                .prepare(
                    "INSERT INTO journal_lines (id, entry_id, account_id, entry_type, amount)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

            for entry in store.entries() {
                insert_entry
                    .execute((
                        entry.id.to_string(),
                        epoch_seconds(entry.date),
                        &entry.description,
                        epoch_seconds(entry.created_at),
                        i64::from(entry.is_balanced()),
                        to_real(entry.total_debits())?,
                        to_real(entry.total_credits())?,
                    ))
                    .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

                // Lines come from the entry's owned list, never queried
                // independently, so the foreign keys are valid by
                // construction.
                for line in &entry.lines {
                    insert_line
                        .execute((
                            line.id.to_string(),
                            line.entry_id.to_string(),
                            line.account_id.to_string(),
                            line.entry_type.as_str(),
                            to_real(line.amount)?,
                        ))
                        .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;
                }
            }
        }

        tx.commit()
            .map_err(|e| ExportError::RowWriteFailed(e.to_string()))
    }
}

/// Converts a decimal amount to the snapshot's native REAL type.
///
/// Lossy for amounts beyond f64 precision; the snapshot format accepts
/// that trade for portability.
pub(crate) fn to_real(amount: Decimal) -> Result<f64, ExportError> {
    amount
        .to_f64()
        .ok_or_else(|| ExportError::RowWriteFailed(format!("amount {amount} not representable")))
}

/// Converts a timestamp to fractional epoch seconds.
#[allow(clippy::cast_precision_loss, clippy::float_arithmetic)]
pub(crate) fn epoch_seconds(ts: DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1_000_000.0
}
