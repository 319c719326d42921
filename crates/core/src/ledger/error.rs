//! Ledger error types for validation, posting, and storage failures.

use rust_decimal::Decimal;
use tally_shared::{AccountId, EntryId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
///
/// All variants are recoverable and returned to the caller; none are used
/// for normal control flow and none terminate the process.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Posting Errors ==========
    /// A posting operation was invoked before bootstrap resolved the
    /// required accounts.
    #[error("Accounts have not been properly initialized")]
    AccountsNotInitialized,

    /// Entry debit and credit totals differ.
    #[error("Journal entry is not balanced. Debits: {debits}, Credits: {credits}")]
    UnbalancedEntry {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    // ========== Validation Errors ==========
    /// An entry must carry at least two lines to be committed.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// All lines are on one side (all debits or all credits).
    #[error("Journal entry must have both debit and credit lines")]
    SingleSided,

    /// Line or posting amount is zero or negative.
    #[error("Amount must be positive")]
    InvalidAmount,

    // ========== Account Errors ==========
    /// Account not found in the store.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Deletion rejected while any journal line references the account.
    #[error("Account {0} still has journal lines and cannot be deleted")]
    AccountHasLines(AccountId),

    // ========== Entry Errors ==========
    /// Journal entry not found in the store.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    // ========== Storage Errors ==========
    /// Failure propagated, unmodified, from the persistence collaborator.
    #[error("Persistence failed: {0}")]
    Persist(String),
}
