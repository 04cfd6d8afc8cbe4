//! LedgerEntity trait implementation for the StockRecord domain type.
//!
//! This module contains the row codec for the stock file and the mutation rules for
//! price updates and quantity adjustments.
//!
//! Row layout, in order: `name, quantity, price, size, available`. `available` is
//! written as `1`/`0` from [`StockRecord::is_available`]; on load it is checked but
//! never trusted over the quantity.

use super::actions::{StockAction, StockLevel};
use super::error::StockError;
use crate::model::{format_price, PriceUpdate, Size, StockCreate, StockKey, StockRecord};
use crate::validate;
use stock_ledger::LedgerEntity;
use tracing::warn;

impl LedgerEntity for StockRecord {
    type Key = StockKey;
    type Create = StockCreate;
    type Update = PriceUpdate;
    type Action = StockAction;
    type ActionResult = StockLevel;
    type Error = StockError;

    const HEADER: &'static [&'static str] = &["name", "quantity", "price", "size", "available"];

    fn key(&self) -> StockKey {
        StockRecord::key(self)
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.quantity.to_string(),
            format_price(self.price),
            self.size.to_string(),
            if self.is_available() { "1" } else { "0" }.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let [name, quantity, price, size, available] = fields else {
            return Err(format!("expected 5 fields, found {}", fields.len()));
        };
        if name.trim().is_empty() {
            return Err("empty item name".to_string());
        }
        let quantity: u32 = quantity
            .trim()
            .parse()
            .map_err(|_| format!("invalid quantity {quantity:?}"))?;
        let price = price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| format!("invalid price {price:?}"))?;
        let size: Size = size.parse().map_err(|_| format!("unknown size {size:?}"))?;
        let flagged = match available.trim() {
            "1" => true,
            "0" => false,
            other => return Err(format!("invalid availability flag {other:?}")),
        };

        let record = StockRecord::new(*name, size, price, quantity);
        if flagged != record.is_available() {
            warn!(key = %record.key(), quantity, flagged, "Availability flag disagrees with quantity, using quantity");
        }
        Ok(record)
    }

    /// Creates a new record from creation parameters.
    fn from_create_params(params: StockCreate) -> Result<Self, StockError> {
        validate::check_create(&params)?;
        Ok(Self::new(params.name, params.size, params.price, params.quantity))
    }

    /// Overwrites the price. No other field changes.
    fn on_update(&mut self, update: PriceUpdate) -> Result<(), StockError> {
        validate::check_price(update.price)?;
        self.price = update.price;
        Ok(())
    }

    /// Handles quantity adjustments.
    ///
    /// # Actions
    /// - `Restock`: adds the delta; fails with `QuantityOverflow` past `u32::MAX`
    /// - `Sell`: subtracts the delta; fails with `InsufficientStock` if it exceeds the
    ///   current quantity. Selling the last unit leaves quantity 0 and the record
    ///   unavailable.
    fn handle_action(&mut self, action: StockAction) -> Result<StockLevel, StockError> {
        match action {
            StockAction::Restock(delta) => {
                validate::check_delta(delta)?;
                self.quantity = self
                    .quantity
                    .checked_add(delta)
                    .ok_or(StockError::QuantityOverflow {
                        current: self.quantity,
                        delta,
                    })?;
            }
            StockAction::Sell(delta) => {
                validate::check_delta(delta)?;
                if delta > self.quantity {
                    return Err(StockError::InsufficientStock {
                        requested: delta,
                        available: self.quantity,
                    });
                }
                self.quantity -= delta;
            }
        }
        Ok(StockLevel {
            quantity: self.quantity,
            available: self.is_available(),
        })
    }
}
