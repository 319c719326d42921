//! Journal entry aggregate and its immutable lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{AccountId, EntryId, LineId, format_usd};

use super::types::EntryType;

/// A single posting line within a journal entry.
///
/// Lines are immutable once created and are owned exclusively by their
/// journal entry; they are destroyed only when the entry is deleted.
/// The amount is non-negative - sign is implied by the entry type and the
/// posted account's normal balance, never encoded in the stored amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: LineId,
    /// The journal entry this line belongs to.
    pub entry_id: EntryId,
    /// The account this line posts to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Non-negative posting amount.
    pub amount: Decimal,
}

impl JournalLine {
    /// Creates a new line attached to the given entry and account.
    #[must_use]
    pub fn new(
        entry_id: EntryId,
        account_id: AccountId,
        entry_type: EntryType,
        amount: Decimal,
    ) -> Self {
        Self {
            id: LineId::new(),
            entry_id,
            account_id,
            entry_type,
            amount,
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => -self.amount,
        }
    }

    /// Formats the line amount as a currency string.
    #[must_use]
    pub fn formatted_amount(&self) -> String {
        format_usd(self.amount)
    }
}

/// A dated, described unit of bookkeeping work.
///
/// An entry owns its lines (cascade-delete) and is committed to storage
/// only when it balances and carries at least two lines. `total_debits`,
/// `total_credits` and `is_balanced` are pure derivations over the owned
/// lines - there is no cached balance field to go stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: EntryId,
    /// Posting date.
    pub date: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// The owned posting lines.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Creates a new empty entry.
    #[must_use]
    pub fn new(date: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            date,
            description: description.into(),
            created_at: Utc::now(),
            lines: Vec::new(),
        }
    }

    /// Creates a new empty entry dated now.
    #[must_use]
    pub fn now(description: impl Into<String>) -> Self {
        Self::new(Utc::now(), description)
    }

    /// Constructs a line and appends it to this entry.
    ///
    /// Does not enforce balance - callers must check `is_balanced` before
    /// treating the entry as committed. The account-side back-index is
    /// updated by the store when the entry is committed.
    pub fn add_line(
        &mut self,
        account_id: AccountId,
        entry_type: EntryType,
        amount: Decimal,
    ) -> LineId {
        let line = JournalLine::new(self.id, account_id, entry_type, amount);
        let line_id = line.id;
        self.lines.push(line);
        line_id
    }

    /// Sum of all debit line amounts.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.side_total(EntryType::Debit)
    }

    /// Sum of all credit line amounts.
    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        self.side_total(EntryType::Credit)
    }

    /// Returns true if debits and credits are exactly equal.
    ///
    /// Exact `Decimal` equality, no tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    fn side_total(&self, side: EntryType) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.entry_type == side)
            .map(|line| line.amount)
            .sum()
    }
}
