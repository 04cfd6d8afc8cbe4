//! # Stock Client
//!
//! Provides a high-level API over the stock ledger.
//! It wraps a `Ledger<StockRecord, _>` and exposes the stock operations: adding an
//! item through the reconciler, adjusting quantities, repricing, and the read-only
//! views used by the item pickers.
use crate::matcher::SimilarityMatcher;
use crate::model::{PriceUpdate, Size, StockCreate, StockKey, StockRecord};
use crate::reconcile::{Confirm, Reconciler};
use crate::stock::{StockAction, StockError, StockLevel};
use std::path::PathBuf;
use stock_ledger::{CsvTable, Ledger, TableBackend};
use tracing::{debug, instrument};

/// Client for the stock ledger.
pub struct StockClient<B = CsvTable> {
    ledger: Ledger<StockRecord, B>,
    reconciler: Reconciler,
}

impl StockClient<CsvTable> {
    /// A client over the CSV file at `path`.
    pub fn open(path: impl Into<PathBuf>, matcher: SimilarityMatcher) -> Self {
        Self::new(CsvTable::new(path), matcher)
    }
}

impl<B: TableBackend> StockClient<B> {
    pub fn new(backend: B, matcher: SimilarityMatcher) -> Self {
        Self {
            ledger: Ledger::new(backend),
            reconciler: Reconciler::new(matcher),
        }
    }

    pub fn ledger(&self) -> &Ledger<StockRecord, B> {
        &self.ledger
    }

    /// Add a new item, asking `confirm` when a similar name is already on file.
    ///
    /// Matching, the duplicate check and the append all see the same snapshot of
    /// the ledger.
    #[instrument(skip(self, confirm))]
    pub fn add_stock(
        &self,
        params: StockCreate,
        confirm: &mut dyn Confirm,
    ) -> Result<StockRecord, StockError> {
        debug!("Reconciling new item");
        self.ledger
            .create_with(|existing| self.reconciler.resolve(params, existing, confirm))
    }

    /// Restock or sell the record stored under `key`.
    #[instrument(skip(self))]
    pub fn adjust_quantity(
        &self,
        key: &StockKey,
        action: StockAction,
    ) -> Result<StockLevel, StockError> {
        self.ledger.act(key, action)
    }

    pub fn restock(&self, key: &StockKey, delta: u32) -> Result<StockLevel, StockError> {
        self.adjust_quantity(key, StockAction::Restock(delta))
    }

    /// Sell `delta` units. Fails with `InsufficientStock` rather than selling fewer.
    pub fn sell(&self, key: &StockKey, delta: u32) -> Result<StockLevel, StockError> {
        self.adjust_quantity(key, StockAction::Sell(delta))
    }

    /// Overwrite the price of the record stored under `key`.
    #[instrument(skip(self))]
    pub fn set_price(&self, key: &StockKey, price: f64) -> Result<StockRecord, StockError> {
        self.ledger.update(key, PriceUpdate { price })
    }

    pub fn get(&self, key: &StockKey) -> Result<Option<StockRecord>, StockError> {
        self.ledger.get(key)
    }

    /// Every record, in file order.
    pub fn list(&self) -> Result<Vec<StockRecord>, StockError> {
        self.ledger.list()
    }

    /// Records with stock on hand, in file order.
    #[instrument(skip(self))]
    pub fn available_items(&self) -> Result<Vec<StockRecord>, StockError> {
        let items: Vec<StockRecord> = self
            .list()?
            .into_iter()
            .filter(StockRecord::is_available)
            .collect();
        debug!(count = items.len(), "Available items");
        Ok(items)
    }

    /// Distinct item names, first occurrence first.
    pub fn item_names(&self) -> Result<Vec<String>, StockError> {
        let mut names: Vec<String> = Vec::new();
        for record in self.list()? {
            if !names.contains(&record.name) {
                names.push(record.name);
            }
        }
        Ok(names)
    }

    /// Sizes on file for `name`, in file order.
    pub fn sizes_for(&self, name: &str) -> Result<Vec<Size>, StockError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.name == name)
            .map(|r| r.size)
            .collect())
    }
}
