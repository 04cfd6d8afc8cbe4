//! # Ledger Errors
//!
//! Storage-level failures shared by every ledger. Entity types convert these into
//! their own error enums (see [`LedgerEntity::Error`](crate::LedgerEntity::Error)),
//! so callers only ever match on one domain error type.

use std::path::PathBuf;

/// Errors raised by the ledger machinery itself.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The backing table does not exist yet.
    #[error("Table not found: {}", path.display())]
    StorageUnavailable { path: PathBuf },

    /// The backing table exists but could not be read.
    #[error("Failed to read {}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The backing table could not be rewritten. Nothing was committed.
    #[error("Failed to update {}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row could not be decoded into a record.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// No record carries the requested key.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// A record with the same key is already stored.
    #[error("Item already exists: {0}")]
    DuplicateKey(String),
}

impl LedgerError {
    /// True for the soft "table missing" condition that callers may treat as empty.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LedgerError::StorageUnavailable { .. })
    }
}
