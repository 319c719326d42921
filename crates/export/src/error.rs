//! Export error types.

use thiserror::Error;

/// Errors that can occur while writing a ledger snapshot.
///
/// Each variant aborts the export; any partially written snapshot file is
/// removed before the error is returned to the caller.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The snapshot database could not be created or replaced.
    #[error("Failed to create snapshot database: {0}")]
    SnapshotCreationFailed(String),

    /// The snapshot schema could not be declared.
    #[error("Failed to create snapshot schema: {0}")]
    SchemaFailed(String),

    /// A row could not be written to the snapshot.
    #[error("Failed to write snapshot row: {0}")]
    RowWriteFailed(String),
}
