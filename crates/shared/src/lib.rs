//! Shared types for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency display formatting with decimal precision

pub mod types;

pub use types::{AccountId, EntryId, LineId, format_usd};
