//! Transactional posting service.
//!
//! The service owns the persistence collaborator and exposes the two
//! posting operations of this ledger (add-money and spend-money), the
//! idempotent default chart-of-accounts bootstrap, and the current
//! spendable balance. Posting is single-writer and synchronous: entries
//! are built and validated in full, then committed as one unit, so no
//! caller ever observes a half-written entry.

use rust_decimal::Decimal;
use tally_shared::{AccountId, EntryId, format_usd};

use super::account::Account;
use super::entry::JournalEntry;
use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::{AccountType, EntryType};
use super::validation::validate_entry;

/// Name of the single asset account.
pub const SPENDING_ACCOUNT: &str = "Spending Money";
/// Name of the income account for non-sale money in.
pub const CONTRIBUTIONS_ACCOUNT: &str = "Contributions";
/// Name of the income account for sale proceeds.
pub const SALES_ACCOUNT: &str = "Sales";
/// Name of the expense account for money out.
pub const PURCHASES_ACCOUNT: &str = "Purchases";

/// The four (name, type) pairs of the default chart of accounts.
const DEFAULT_CHART: [(&str, AccountType); 4] = [
    (SPENDING_ACCOUNT, AccountType::Asset),
    (CONTRIBUTIONS_ACCOUNT, AccountType::Income),
    (SALES_ACCOUNT, AccountType::Income),
    (PURCHASES_ACCOUNT, AccountType::Expense),
];

/// Transactional façade over the ledger.
pub struct LedgerService<S: LedgerStore> {
    store: S,
    spending: Option<AccountId>,
    contributions: Option<AccountId>,
    sales: Option<AccountId>,
    purchases: Option<AccountId>,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over the given store.
    ///
    /// [`bootstrap`](Self::bootstrap) must run before any posting
    /// operation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            spending: None,
            contributions: None,
            sales: None,
            purchases: None,
        }
    }

    /// Resolves or creates the default chart of accounts.
    ///
    /// Idempotent and re-entrant-safe: existing accounts are matched by
    /// name before anything is created, so repeated calls never produce
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns `Persist` if the store rejects an insert or save.
    pub fn bootstrap(&mut self) -> Result<(), LedgerError> {
        let existing = self.store.accounts();
        let mut resolved: [Option<AccountId>; 4] = [None; 4];

        for (slot, (name, account_type)) in resolved.iter_mut().zip(DEFAULT_CHART) {
            let found = existing.iter().find(|account| account.name == name);
            match found {
                Some(account) => *slot = Some(account.id),
                None => {
                    let account = Account::new(name, account_type);
                    let id = account.id;
                    self.store.insert_account(account)?;
                    *slot = Some(id);
                }
            }
        }

        self.store.save()?;

        [self.spending, self.contributions, self.sales, self.purchases] = resolved;
        Ok(())
    }

    /// Records money coming in as a balanced two-line entry.
    ///
    /// Debits the spending account and credits Sales (`is_sale`) or
    /// Contributions, both for `amount`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive amount (before any entry
    /// is constructed), `AccountsNotInitialized` if bootstrap has not
    /// resolved the accounts, and `UnbalancedEntry` as a defensive check
    /// before commit.
    pub fn add_money(
        &mut self,
        amount: Decimal,
        description: &str,
        is_sale: bool,
    ) -> Result<EntryId, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let spending = self.spending.ok_or(LedgerError::AccountsNotInitialized)?;
        let income = if is_sale { self.sales } else { self.contributions };
        let income = income.ok_or(LedgerError::AccountsNotInitialized)?;

        let mut entry = JournalEntry::now(description);
        entry.add_line(spending, EntryType::Debit, amount);
        entry.add_line(income, EntryType::Credit, amount);

        self.post(entry)
    }

    /// Records money going out as a balanced two-line entry.
    ///
    /// Debits Purchases and credits the spending account, both for
    /// `amount`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`add_money`](Self::add_money).
    pub fn spend_money(
        &mut self,
        amount: Decimal,
        description: &str,
    ) -> Result<EntryId, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let spending = self.spending.ok_or(LedgerError::AccountsNotInitialized)?;
        let purchases = self.purchases.ok_or(LedgerError::AccountsNotInitialized)?;

        let mut entry = JournalEntry::now(description);
        entry.add_line(purchases, EntryType::Debit, amount);
        entry.add_line(spending, EntryType::Credit, amount);

        self.post(entry)
    }

    /// Validates and commits a fully built entry as one unit.
    fn post(&mut self, entry: JournalEntry) -> Result<EntryId, LedgerError> {
        validate_entry(&entry)?;

        let entry_id = entry.id;
        self.store.commit_entry(entry)?;
        self.store.save()?;
        Ok(entry_id)
    }

    /// The spending account's derived balance.
    ///
    /// Zero on an empty or un-bootstrapped ledger.
    #[must_use]
    pub fn current_balance(&self) -> Decimal {
        self.account_balance(self.spending)
    }

    /// The spending balance formatted as a currency string.
    #[must_use]
    pub fn formatted_balance(&self) -> String {
        format_usd(self.current_balance())
    }

    /// Derived balance for one of the resolved accounts.
    fn account_balance(&self, id: Option<AccountId>) -> Decimal {
        let Some(id) = id else {
            return Decimal::ZERO;
        };
        let Some(account) = self.store.account(id) else {
            return Decimal::ZERO;
        };
        account.balance(&self.store.lines_for_account(id))
    }

    /// Deletes an account, honoring the deny-delete guard.
    ///
    /// # Errors
    ///
    /// Returns `AccountHasLines` while any line references the account.
    pub fn delete_account(&mut self, id: AccountId) -> Result<(), LedgerError> {
        self.store.delete_account(id)?;
        self.store.save()
    }

    /// Deletes a journal entry, cascading to its lines.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an unknown id.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<(), LedgerError> {
        self.store.delete_entry(id)?;
        self.store.save()
    }

    /// The resolved spending (asset) account, if bootstrapped.
    #[must_use]
    pub fn spending_account(&self) -> Option<Account> {
        self.spending.and_then(|id| self.store.account(id))
    }

    /// The resolved contributions (income) account, if bootstrapped.
    #[must_use]
    pub fn contributions_account(&self) -> Option<Account> {
        self.contributions.and_then(|id| self.store.account(id))
    }

    /// The resolved sales (income) account, if bootstrapped.
    #[must_use]
    pub fn sales_account(&self) -> Option<Account> {
        self.sales.and_then(|id| self.store.account(id))
    }

    /// The resolved purchases (expense) account, if bootstrapped.
    #[must_use]
    pub fn purchases_account(&self) -> Option<Account> {
        self.purchases.and_then(|id| self.store.account(id))
    }

    /// Read access to the underlying store (used by the exporters).
    ///
    /// A snapshot taken through this reference may be stale relative to
    /// concurrent writers; the service itself serializes writes.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
