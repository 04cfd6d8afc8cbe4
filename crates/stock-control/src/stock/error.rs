//! Error types for stock operations.

use crate::model::StockKey;
use std::path::PathBuf;
use stock_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur during stock operations.
///
/// Every variant is recoverable: the caller reports the message once and the
/// session stays usable.
#[derive(Debug, Error)]
pub enum StockError {
    /// User input failed a field check. The message is meant for the user as-is.
    #[error("{0}")]
    Validation(String),

    /// The stock file does not exist yet.
    #[error("Stock file not found: {}", path.display())]
    StorageUnavailable { path: PathBuf },

    /// The stock file exists but could not be read or decoded.
    #[error("Failed to read the stock file")]
    StorageRead(#[source] LedgerError),

    /// The stock file could not be rewritten; the change was not saved.
    #[error("Failed to update the stock file")]
    StorageWrite(#[source] LedgerError),

    /// A record with this name and size already exists.
    #[error("An item with name '{}' and size '{}' already exists.", .0.name, .0.size)]
    DuplicateKey(StockKey),

    /// No record has this name and size.
    #[error("Selected item and size not found: {0}")]
    RecordNotFound(String),

    /// A sale asked for more units than are in stock.
    #[error("Not enough copies available for this transaction: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// A restock would push the quantity past what the ledger can hold.
    #[error("Cannot add {delta} to a stock level of {current}")]
    QuantityOverflow { current: u32, delta: u32 },
}

impl From<LedgerError> for StockError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::StorageUnavailable { path } => StockError::StorageUnavailable { path },
            LedgerError::NotFound(key) => StockError::RecordNotFound(key),
            // Ledger keys are rendered with StockKey's Display, so they parse back.
            LedgerError::DuplicateKey(key) => match key.parse() {
                Ok(key) => StockError::DuplicateKey(key),
                Err(_) => StockError::StorageWrite(LedgerError::DuplicateKey(key)),
            },
            e @ LedgerError::StorageWrite { .. } => StockError::StorageWrite(e),
            e @ (LedgerError::StorageRead { .. } | LedgerError::MalformedRow { .. }) => {
                StockError::StorageRead(e)
            }
        }
    }
}

impl StockError {
    /// The soft "no stock file yet" condition.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StockError::StorageUnavailable { .. })
    }
}
