//! SQLite snapshot export for the Tally ledger.
//!
//! Walks the full account/entry/line graph of a [`tally_core::ledger::LedgerStore`]
//! and emits flat, self-consistent relational snapshots for external
//! reporting tools:
//!
//! - [`SnapshotExporter`] - the full double-entry snapshot (accounts,
//!   journal entries, journal lines)
//! - [`FlatExporter`] - the legacy flat-transaction variant with a derived
//!   `account_summary` view
//!
//! Monetary values are exported as decimal-to-float conversions for the
//! snapshot's native REAL type; the export deliberately trades
//! arbitrary-precision decimal storage for portability. Exports only read
//! ledger state - a snapshot may be stale relative to concurrent writers.

pub mod error;
pub mod flat;
pub mod snapshot;

pub use error::ExportError;
pub use flat::{FlatExporter, FlatTransaction, TransactionKind, flatten};
pub use snapshot::SnapshotExporter;
