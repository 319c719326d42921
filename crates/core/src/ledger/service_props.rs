//! Property-based tests for LedgerService.
//!
//! - Posting integrity: every committed entry balances exactly
//! - Bootstrap idempotence under repetition
//! - Spendable balance as net of money in and money out

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LedgerService;
use super::store::{LedgerStore, MemoryStore};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A posting operation against the service.
#[derive(Debug, Clone)]
enum Op {
    Add { amount: Decimal, is_sale: bool },
    Spend { amount: Decimal },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (positive_amount(), any::<bool>())
            .prop_map(|(amount, is_sale)| Op::Add { amount, is_sale }),
        positive_amount().prop_map(|amount| Op::Spend { amount }),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn bootstrapped() -> LedgerService<MemoryStore> {
    let mut service = LedgerService::new(MemoryStore::new());
    service.bootstrap().expect("bootstrap");
    service
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any sequence of postings, every committed entry has exactly two
    /// lines and balances exactly.
    #[test]
    fn prop_all_committed_entries_balance(ops in ops_strategy(20)) {
        let mut service = bootstrapped();
        for op in &ops {
            match op {
                Op::Add { amount, is_sale } => {
                    service.add_money(*amount, "in", *is_sale).expect("add");
                }
                Op::Spend { amount } => {
                    service.spend_money(*amount, "out").expect("spend");
                }
            }
        }

        let entries = service.store().entries();
        prop_assert_eq!(entries.len(), ops.len());
        for entry in entries {
            prop_assert_eq!(entry.lines.len(), 2);
            prop_assert!(entry.is_balanced());
        }
    }

    /// For any sequence of postings, the spendable balance equals money in
    /// minus money out.
    #[test]
    fn prop_balance_is_net_of_postings(ops in ops_strategy(20)) {
        let mut service = bootstrapped();
        let mut expected = Decimal::ZERO;
        for op in &ops {
            match op {
                Op::Add { amount, is_sale } => {
                    service.add_money(*amount, "in", *is_sale).expect("add");
                    expected += *amount;
                }
                Op::Spend { amount } => {
                    service.spend_money(*amount, "out").expect("spend");
                    expected -= *amount;
                }
            }
        }

        prop_assert_eq!(service.current_balance(), expected);
    }

    /// For any number of repeated bootstraps, exactly four accounts exist.
    #[test]
    fn prop_bootstrap_idempotent(repeats in 1usize..5) {
        let mut service = LedgerService::new(MemoryStore::new());
        for _ in 0..repeats {
            service.bootstrap().expect("bootstrap");
        }
        prop_assert_eq!(service.store().accounts().len(), 4);
    }

    /// For any non-positive amount, posting is rejected and nothing is
    /// committed.
    #[test]
    fn prop_non_positive_amounts_rejected(cents in -1_000_000i64..=0) {
        let amount = Decimal::new(cents, 2);
        let mut service = bootstrapped();

        prop_assert!(service.add_money(amount, "in", false).is_err());
        prop_assert!(service.spend_money(amount, "out").is_err());
        prop_assert!(service.store().entries().is_empty());
    }

    /// Sale routing: sales postings never touch Contributions, and vice
    /// versa.
    #[test]
    fn prop_sale_routing(amount in positive_amount(), is_sale in any::<bool>()) {
        let mut service = bootstrapped();
        service.add_money(amount, "in", is_sale).expect("add");

        let sales = service.sales_account().expect("sales");
        let contributions = service.contributions_account().expect("contributions");
        let sales_lines = service.store().lines_for_account(sales.id);
        let contribution_lines = service.store().lines_for_account(contributions.id);

        if is_sale {
            prop_assert_eq!(sales.balance(&sales_lines), amount);
            prop_assert_eq!(contributions.balance(&contribution_lines), Decimal::ZERO);
        } else {
            prop_assert_eq!(contributions.balance(&contribution_lines), amount);
            prop_assert_eq!(sales.balance(&sales_lines), Decimal::ZERO);
        }
    }
}
