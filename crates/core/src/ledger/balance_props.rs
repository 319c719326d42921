//! Property-based tests for balance arithmetic.
//!
//! - Entry balance integrity: committed two-line postings always balance
//! - Account balance as a pure, order-independent derivation over lines

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::{AccountId, EntryId};

use super::account::Account;
use super::entry::{JournalEntry, JournalLine};
use super::types::{AccountType, EntryType};
use super::validation::validate_entry;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate entry type.
fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

/// Strategy to generate account type.
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Income),
        Just(AccountType::Expense),
    ]
}

/// Strategy to generate a set of lines for one account.
fn lines_strategy(max_len: usize) -> impl Strategy<Value = Vec<(EntryType, Decimal)>> {
    prop::collection::vec((entry_type_strategy(), positive_amount()), 1..=max_len)
}

fn make_lines(account_id: AccountId, specs: &[(EntryType, Decimal)]) -> Vec<JournalLine> {
    specs
        .iter()
        .map(|(entry_type, amount)| {
            JournalLine::new(EntryId::new(), account_id, *entry_type, *amount)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any positive amount, the two-line posting shape passes
    /// validation and its totals are exactly equal.
    #[test]
    fn prop_two_line_posting_always_balances(amount in positive_amount()) {
        let mut entry = JournalEntry::now("posting");
        entry.add_line(AccountId::new(), EntryType::Debit, amount);
        entry.add_line(AccountId::new(), EntryType::Credit, amount);

        prop_assert!(validate_entry(&entry).is_ok());
        prop_assert!(entry.is_balanced());
        prop_assert_eq!(entry.total_debits(), entry.total_credits());
    }

    /// For any pair of differing positive amounts, validation rejects the
    /// entry with the exact totals in the error.
    #[test]
    fn prop_differing_amounts_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);

        let mut entry = JournalEntry::now("unbalanced");
        entry.add_line(AccountId::new(), EntryType::Debit, debit);
        entry.add_line(AccountId::new(), EntryType::Credit, credit);

        prop_assert!(!entry.is_balanced());
        prop_assert!(validate_entry(&entry).is_err());
    }

    /// For any account and any set of lines, the balance equals the sum of
    /// normal-side amounts minus the sum of opposing amounts.
    #[test]
    fn prop_balance_matches_sign_formula(
        account_type in account_type_strategy(),
        specs in lines_strategy(20),
    ) {
        let account = Account::new("any", account_type);
        let lines = make_lines(account.id, &specs);

        let normal = account_type.normal_balance();
        let expected: Decimal = specs
            .iter()
            .map(|(entry_type, amount)| {
                if *entry_type == normal { *amount } else { -*amount }
            })
            .sum();

        prop_assert_eq!(account.balance(&lines), expected);
    }

    /// For any set of lines, the balance is independent of line order.
    #[test]
    fn prop_balance_is_order_independent(
        account_type in account_type_strategy(),
        specs in lines_strategy(20),
    ) {
        let account = Account::new("any", account_type);
        let mut lines = make_lines(account.id, &specs);

        let forward = account.balance(&lines);
        lines.reverse();
        prop_assert_eq!(account.balance(&lines), forward);
    }

    /// For any line, the signed amount flips sign exactly on credit.
    #[test]
    fn prop_signed_amount_sign(
        entry_type in entry_type_strategy(),
        amount in positive_amount(),
    ) {
        let line = JournalLine::new(EntryId::new(), AccountId::new(), entry_type, amount);
        match entry_type {
            EntryType::Debit => prop_assert_eq!(line.signed_amount(), amount),
            EntryType::Credit => prop_assert_eq!(line.signed_amount(), -amount),
        }
    }
}
