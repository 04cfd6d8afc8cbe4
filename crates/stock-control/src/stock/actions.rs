//! Custom actions for stock records.
//!
//! These are the quantity adjustments handled by
//! [`LedgerEntity::handle_action`](stock_ledger::LedgerEntity::handle_action) for
//! [`StockRecord`](crate::model::StockRecord).

use crate::model::QuantityOperation;

/// Quantity adjustments. Each carries the user-entered delta, which must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    /// Adds units to the stock level.
    Restock(u32),
    /// Removes units from the stock level.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the delta exceeds the current quantity.
    /// Partial sales are never made.
    Sell(u32),
}

impl StockAction {
    pub fn new(operation: QuantityOperation, delta: u32) -> Self {
        match operation {
            QuantityOperation::Restock => StockAction::Restock(delta),
            QuantityOperation::Sell => StockAction::Sell(delta),
        }
    }
}

/// Stock level after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub quantity: u32,
    pub available: bool,
}
