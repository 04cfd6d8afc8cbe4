//! # Stock Records
//!
//! The stock domain on top of the generic ledger: how a [`StockRecord`] is stored,
//! created, repriced and adjusted.
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerEntity`](stock_ledger::LedgerEntity) implementation for [`StockRecord`]
//! - [`error`] - [`StockError`], the single error type of every stock operation
//! - [`actions`] - [`StockAction`] and [`StockLevel`] for quantity adjustments
//! - [`open()`] - Factory for a file-backed stock ledger
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Receive three units
//! ledger.act(&key, StockAction::Restock(3))?;
//!
//! // Sell two; fails with InsufficientStock if fewer are on hand
//! ledger.act(&key, StockAction::Sell(2))?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::StockRecord;
use std::path::PathBuf;
use stock_ledger::{CsvTable, Ledger};

/// Creates a stock ledger backed by the CSV file at `path`.
pub fn open(path: impl Into<PathBuf>) -> Ledger<StockRecord, CsvTable> {
    Ledger::new(CsvTable::new(path))
}
