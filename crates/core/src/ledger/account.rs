//! Ledger account entity and derived balance calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::{AccountId, format_usd};

use super::entry::JournalLine;
use super::types::AccountType;

/// A named ledger account.
///
/// Accounts do not own their journal lines; lines are owned by the journal
/// entry that created them, and the store keeps a non-owning back-index from
/// account to line. Balance is always derived from that index, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name, unique within the chart of accounts by convention.
    pub name: String,
    /// Account classification. Immutable after creation.
    pub account_type: AccountType,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Derives the account balance from its posted lines.
    ///
    /// Lines whose entry type matches the account's normal balance add to
    /// the balance; opposing lines subtract. The result is independent of
    /// line order.
    #[must_use]
    pub fn balance(&self, lines: &[JournalLine]) -> Decimal {
        let normal = self.account_type.normal_balance();
        lines.iter().fold(Decimal::ZERO, |total, line| {
            if line.entry_type == normal {
                total + line.amount
            } else {
                total - line.amount
            }
        })
    }

    /// Formats the derived balance as a currency string.
    #[must_use]
    pub fn formatted_balance(&self, lines: &[JournalLine]) -> String {
        format_usd(self.balance(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::EntryType;
    use rust_decimal_macros::dec;
    use tally_shared::EntryId;

    fn make_line(account: &Account, entry_type: EntryType, amount: Decimal) -> JournalLine {
        JournalLine::new(EntryId::new(), account.id, entry_type, amount)
    }

    #[test]
    fn test_new_account_is_active_and_empty() {
        let account = Account::new("Spending Money", AccountType::Asset);
        assert!(account.is_active);
        assert_eq!(account.balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_asset_balance_debits_add_credits_subtract() {
        let account = Account::new("Spending Money", AccountType::Asset);
        let lines = vec![
            make_line(&account, EntryType::Debit, dec!(100)),
            make_line(&account, EntryType::Credit, dec!(40)),
        ];
        assert_eq!(account.balance(&lines), dec!(60));
    }

    #[test]
    fn test_income_balance_credits_add_debits_subtract() {
        let account = Account::new("Contributions", AccountType::Income);
        let lines = vec![
            make_line(&account, EntryType::Credit, dec!(100)),
            make_line(&account, EntryType::Debit, dec!(25)),
        ];
        assert_eq!(account.balance(&lines), dec!(75));
    }

    #[test]
    fn test_expense_balance_is_debit_normal() {
        let account = Account::new("Purchases", AccountType::Expense);
        let lines = vec![make_line(&account, EntryType::Debit, dec!(40))];
        assert_eq!(account.balance(&lines), dec!(40));
    }

    #[test]
    fn test_balance_is_order_independent() {
        let account = Account::new("Spending Money", AccountType::Asset);
        let mut lines = vec![
            make_line(&account, EntryType::Debit, dec!(100)),
            make_line(&account, EntryType::Credit, dec!(40)),
            make_line(&account, EntryType::Debit, dec!(12.34)),
        ];
        let forward = account.balance(&lines);
        lines.reverse();
        assert_eq!(account.balance(&lines), forward);
    }

    #[test]
    fn test_formatted_balance() {
        let account = Account::new("Spending Money", AccountType::Asset);
        let lines = vec![make_line(&account, EntryType::Debit, dec!(1234.5))];
        assert_eq!(account.formatted_balance(&lines), "$1,234.50");
    }
}
