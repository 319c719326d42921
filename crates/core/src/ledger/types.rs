//! Ledger domain enums and their arithmetic rules.
//!
//! This module defines the two entry kinds (debit, credit) and the
//! per-account-type normal-balance and sign rules that drive every
//! balance calculation in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases asset/expense accounts, decreases income accounts).
    Debit,
    /// Credit entry (decreases asset/expense accounts, increases income accounts).
    Credit,
}

impl EntryType {
    /// Short display label ("Dr" / "Cr").
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Debit => "Dr",
            Self::Credit => "Cr",
        }
    }

    /// Returns the opposite entry type.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Canonical name used by the export snapshot ("Debit" / "Credit").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

/// Account classification for balance calculation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Income account (credit-normal).
    Income,
    /// Expense account (debit-normal).
    Expense,
}

impl AccountType {
    /// The entry type that increases an account of this type.
    ///
    /// Derived, never stored:
    /// - Asset/Expense are debit-normal
    /// - Income is credit-normal
    #[must_use]
    pub const fn normal_balance(self) -> EntryType {
        match self {
            Self::Asset | Self::Expense => EntryType::Debit,
            Self::Income => EntryType::Credit,
        }
    }

    /// Sign multiplier for collapsing accounts into a single net figure
    /// (asset positive, income and expense negative).
    ///
    /// Not part of the double-entry balance formula.
    #[must_use]
    pub fn sign_multiplier(self) -> Decimal {
        match self {
            Self::Asset => Decimal::ONE,
            Self::Income | Self::Expense => Decimal::NEGATIVE_ONE,
        }
    }

    /// Canonical name used by the export snapshot ("Asset" / "Income" / "Expense").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}
