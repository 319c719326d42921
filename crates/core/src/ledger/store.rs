//! Persistence collaborator contract and the in-memory store.
//!
//! The ledger core never assumes a specific storage engine - only the
//! operations on [`LedgerStore`] plus referential integrity: a committed
//! line's account and entry references remain valid until explicitly
//! deleted. Ownership follows the entry-owns-lines rule (cascade on entry
//! deletion), while the account-to-line relation is a non-owning back-index
//! used only for balance computation and the deny-delete check.

use std::collections::HashMap;

use tally_shared::{AccountId, EntryId, LineId};

use super::account::Account;
use super::entry::{JournalEntry, JournalLine};
use super::error::LedgerError;

/// Storage contract consumed by the posting service and the exporters.
///
/// Mutating operations must apply atomically from the caller's point of
/// view: a committed entry lands together with all of its lines, or not at
/// all. Iteration order of `accounts` and `entries` must be deterministic
/// for a given store state.
pub trait LedgerStore {
    /// Returns all accounts in deterministic (creation) order.
    fn accounts(&self) -> Vec<Account>;

    /// Returns all journal entries in deterministic (creation) order.
    fn entries(&self) -> Vec<JournalEntry>;

    /// Looks up a single account.
    fn account(&self, id: AccountId) -> Option<Account>;

    /// Looks up a single journal entry.
    fn entry(&self, id: EntryId) -> Option<JournalEntry>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// Returns `Persist` if the account id is already present.
    fn insert_account(&mut self, account: Account) -> Result<(), LedgerError>;

    /// Commits a journal entry together with all of its lines as one unit.
    ///
    /// Updates the account-to-line back-index for every line. Nothing is
    /// stored if any line references an unknown account or a foreign entry.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for a dangling account reference and
    /// `Persist` for a line not attached to the committed entry.
    fn commit_entry(&mut self, entry: JournalEntry) -> Result<(), LedgerError>;

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountHasLines` while any journal line references the
    /// account (deny-delete), and `AccountNotFound` for an unknown id.
    fn delete_account(&mut self, id: AccountId) -> Result<(), LedgerError>;

    /// Deletes a journal entry, cascading to its owned lines.
    ///
    /// Back-index references for the removed lines are dropped, so account
    /// balances immediately reflect their absence.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` for an unknown id.
    fn delete_entry(&mut self, id: EntryId) -> Result<(), LedgerError>;

    /// Returns the lines posted to an account, in posting order.
    fn lines_for_account(&self, id: AccountId) -> Vec<JournalLine>;

    /// Flushes pending state to the underlying medium.
    ///
    /// # Errors
    ///
    /// Returns `Persist` on storage failure.
    fn save(&mut self) -> Result<(), LedgerError>;
}

/// In-process [`LedgerStore`] implementation.
///
/// Insertion order is tracked explicitly, so iteration yields creation
/// order and repeated exports of the same state see identical row order.
/// The `account_lines` back-index carries ids only - lines themselves live
/// inside their owning entry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: HashMap<AccountId, Account>,
    account_order: Vec<AccountId>,
    entries: HashMap<EntryId, JournalEntry>,
    entry_order: Vec<EntryId>,
    account_lines: HashMap<AccountId, Vec<LineId>>,
    line_owner: HashMap<LineId, EntryId>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn accounts(&self) -> Vec<Account> {
        self.account_order
            .iter()
            .filter_map(|id| self.accounts.get(id).cloned())
            .collect()
    }

    fn entries(&self) -> Vec<JournalEntry> {
        self.entry_order
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect()
    }

    fn account(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).cloned()
    }

    fn entry(&self, id: EntryId) -> Option<JournalEntry> {
        self.entries.get(&id).cloned()
    }

    fn insert_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&account.id) {
            return Err(LedgerError::Persist(format!(
                "duplicate account id {}",
                account.id
            )));
        }
        self.account_lines.entry(account.id).or_default();
        self.account_order.push(account.id);
        self.accounts.insert(account.id, account);
        Ok(())
    }

    fn commit_entry(&mut self, entry: JournalEntry) -> Result<(), LedgerError> {
        // Referential integrity first; nothing is mutated on failure.
        for line in &entry.lines {
            if !self.accounts.contains_key(&line.account_id) {
                return Err(LedgerError::AccountNotFound(line.account_id));
            }
            if line.entry_id != entry.id {
                return Err(LedgerError::Persist(format!(
                    "line {} is not attached to entry {}",
                    line.id, entry.id
                )));
            }
        }
        if self.entries.contains_key(&entry.id) {
            return Err(LedgerError::Persist(format!(
                "duplicate entry id {}",
                entry.id
            )));
        }

        for line in &entry.lines {
            self.account_lines
                .entry(line.account_id)
                .or_default()
                .push(line.id);
            self.line_owner.insert(line.id, entry.id);
        }
        self.entry_order.push(entry.id);
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    fn delete_account(&mut self, id: AccountId) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(&id) {
            return Err(LedgerError::AccountNotFound(id));
        }
        if self.account_lines.get(&id).is_some_and(|lines| !lines.is_empty()) {
            return Err(LedgerError::AccountHasLines(id));
        }
        self.accounts.remove(&id);
        self.account_order.retain(|account_id| *account_id != id);
        self.account_lines.remove(&id);
        Ok(())
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<(), LedgerError> {
        let entry = self.entries.remove(&id).ok_or(LedgerError::EntryNotFound(id))?;
        self.entry_order.retain(|entry_id| *entry_id != id);
        for line in &entry.lines {
            if let Some(ids) = self.account_lines.get_mut(&line.account_id) {
                ids.retain(|line_id| *line_id != line.id);
            }
            self.line_owner.remove(&line.id);
        }
        Ok(())
    }

    fn lines_for_account(&self, id: AccountId) -> Vec<JournalLine> {
        let Some(line_ids) = self.account_lines.get(&id) else {
            return Vec::new();
        };
        line_ids
            .iter()
            .filter_map(|line_id| {
                let entry_id = self.line_owner.get(line_id)?;
                let entry = self.entries.get(entry_id)?;
                entry.lines.iter().find(|line| line.id == *line_id).cloned()
            })
            .collect()
    }

    fn save(&mut self) -> Result<(), LedgerError> {
        // In-process store: state is already current.
        Ok(())
    }
}
