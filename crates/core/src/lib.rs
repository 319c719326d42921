//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO storage dependencies.
//! All domain types, validation rules, and balance calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping logic

pub mod ledger;
