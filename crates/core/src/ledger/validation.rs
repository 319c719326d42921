//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::entry::JournalEntry;
use super::error::LedgerError;
use super::types::EntryType;

/// Validates that a journal entry may be committed.
///
/// Checks, in order: at least two lines, every line amount strictly
/// positive, both sides represented, and exact debit/credit equality.
///
/// # Errors
///
/// Returns an error if the entry violates any commit rule.
pub fn validate_entry(entry: &JournalEntry) -> Result<(), LedgerError> {
    if entry.lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut has_debit = false;
    let mut has_credit = false;

    for line in &entry.lines {
        if line.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        match line.entry_type {
            EntryType::Debit => has_debit = true,
            EntryType::Credit => has_credit = true,
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    let debits = entry.total_debits();
    let credits = entry.total_credits();
    if debits != credits {
        return Err(LedgerError::UnbalancedEntry { debits, credits });
    }

    Ok(())
}
