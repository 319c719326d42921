//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Account and entry type arithmetic (normal balances, signs)
//! - Ledger accounts with derived balances
//! - Journal entries and their immutable lines
//! - Business rule validation
//! - The persistence collaborator contract and an in-memory store
//! - The transactional posting service

pub mod account;
pub mod entry;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod service_props;

pub use account::Account;
pub use entry::{JournalEntry, JournalLine};
pub use error::LedgerError;
pub use service::LedgerService;
pub use store::{LedgerStore, MemoryStore};
pub use types::{AccountType, EntryType};
