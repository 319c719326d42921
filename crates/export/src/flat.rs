//! Legacy flat-transaction export variant.
//!
//! The flat model collapses each posted two-line entry into a single
//! signed transaction row. It exists only for this export surface and for
//! backward-compatible import of the exploratory single-table format - its
//! sign rules never feed back into the double-entry balance formula.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_core::ledger::service::SALES_ACCOUNT;
use tally_core::ledger::{AccountType, EntryType, LedgerStore};
use uuid::Uuid;

use crate::error::ExportError;
use crate::snapshot::{epoch_seconds, to_real};

const SCHEMA: &str = r"
    CREATE TABLE transactions (
        id TEXT PRIMARY KEY,
        date REAL NOT NULL,
        amount REAL NOT NULL,
        description TEXT NOT NULL,
        type TEXT NOT NULL,
        signed_amount REAL NOT NULL
    );

    CREATE VIEW account_summary AS
    SELECT
        COUNT(*) as total_transactions,
        SUM(CASE WHEN signed_amount > 0 THEN signed_amount ELSE 0 END) as total_income,
        SUM(CASE WHEN signed_amount < 0 THEN ABS(signed_amount) ELSE 0 END) as total_expenses,
        SUM(signed_amount) as current_balance,
        MIN(date) as first_transaction_date,
        MAX(date) as last_transaction_date
    FROM transactions;
";

/// Flat transaction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in that is not a sale.
    Income,
    /// Money out.
    Expense,
    /// Sale proceeds.
    Sale,
}

impl TransactionKind {
    /// Canonical name used by the export ("Income" / "Expense" / "Sale").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Sale => "Sale",
        }
    }
}

/// A single-row view of one posted transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatTransaction {
    /// Identifier, shared with the originating journal entry.
    pub id: Uuid,
    /// Transaction date.
    pub date: DateTime<Utc>,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Classification driving the sign.
    pub kind: TransactionKind,
}

impl FlatTransaction {
    /// Signed amount: income and sales positive, expenses negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income | TransactionKind::Sale => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Collapses the posted ledger graph into flat transactions.
///
/// Only balanced two-line entries map to the flat model (the only posting
/// shapes this ledger produces); anything else is skipped. An entry whose
/// debit hits an expense account becomes an `Expense`; a credit to the
/// Sales account becomes a `Sale`; any other income credit becomes an
/// `Income`.
#[must_use]
pub fn flatten<S: LedgerStore>(store: &S) -> Vec<FlatTransaction> {
    store
        .entries()
        .into_iter()
        .filter_map(|entry| {
            if entry.lines.len() != 2 || !entry.is_balanced() {
                return None;
            }
            let debit = entry.lines.iter().find(|l| l.entry_type == EntryType::Debit)?;
            let credit = entry
                .lines
                .iter()
                .find(|l| l.entry_type == EntryType::Credit)?;

            let amount = debit.amount;
            let debit_account = store.account(debit.account_id)?;
            let credit_account = store.account(credit.account_id)?;

            let kind = if debit_account.account_type == AccountType::Expense {
                TransactionKind::Expense
            } else if credit_account.account_type == AccountType::Income {
                if credit_account.name == SALES_ACCOUNT {
                    TransactionKind::Sale
                } else {
                    TransactionKind::Income
                }
            } else {
                return None;
            };

            Some(FlatTransaction {
                id: entry.id.into_inner(),
                date: entry.date,
                amount,
                description: entry.description,
                kind,
            })
        })
        .collect()
}

/// Exports flat transactions with the derived `account_summary` view.
pub struct FlatExporter;

impl FlatExporter {
    /// Writes the flat snapshot to `path`, replacing any pre-existing
    /// file.
    ///
    /// Fails atomically: on any error the partially written file is
    /// removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] naming the failed phase.
    pub fn export(transactions: &[FlatTransaction], path: &Path) -> Result<(), ExportError> {
        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| ExportError::SnapshotCreationFailed(e.to_string()))?;
        }

        let result = Self::write_snapshot(transactions, path);
        if result.is_err() {
            let _ = fs::remove_file(path);
        }
        result
    }

    fn write_snapshot(transactions: &[FlatTransaction], path: &Path) -> Result<(), ExportError> {
        let mut conn = Connection::open(path)
            .map_err(|e| ExportError::SnapshotCreationFailed(e.to_string()))?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| ExportError::SchemaFailed(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

        {
            let mut insert = tx
                .prepare(
                    "INSERT INTO transactions (id, date, amount, description, type, signed_amount)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;

            for transaction in transactions {
                insert
                    .execute((
                        transaction.id.to_string(),
                        epoch_seconds(transaction.date),
                        to_real(transaction.amount)?,
                        &transaction.description,
                        transaction.kind.as_str(),
                        to_real(transaction.signed_amount())?,
                    ))
                    .map_err(|e| ExportError::RowWriteFailed(e.to_string()))?;
            }
        }

        tx.commit()
            .map_err(|e| ExportError::RowWriteFailed(e.to_string()))
    }
}
