//! # Input Validation
//!
//! Pure, stateless field checks applied to user-entered strings before they become
//! typed payloads. Every failure is a [`StockError::Validation`] whose message can be
//! shown to the user unchanged.
//!
//! The three forms mirror the three editing screens:
//!
//! - [`AddStockForm`] → [`StockCreate`]
//! - [`QuantityForm`] → [`StockKey`] + [`StockAction`]
//! - [`PriceForm`] → [`StockKey`] + [`PriceUpdate`]
//!
//! A presentation layer that wants the plain `(ok, message)` pair can use
//! [`verdict`] or the forms' `check` methods.

use crate::model::{PriceUpdate, QuantityOperation, Size, StockCreate, StockKey};
use crate::stock::{StockAction, StockError};

pub const NAME_REQUIRED: &str = "Item name cannot be empty.";
pub const SIZE_REQUIRED: &str = "Size must be selected.";
pub const PRICE_INVALID: &str = "Price must be a positive number.";
pub const QUANTITY_INVALID: &str = "Quantity must be a positive integer.";
pub const ITEM_NOT_SELECTED: &str = "No item selected.";
pub const SIZE_NOT_SELECTED: &str = "No size selected.";

fn invalid(message: &str) -> StockError {
    StockError::Validation(message.to_string())
}

/// Collapse a validation result into `(ok, message)`; the message is empty when ok.
pub fn verdict<T>(result: &Result<T, StockError>) -> (bool, String) {
    match result {
        Ok(_) => (true, String::new()),
        Err(e) => (false, e.to_string()),
    }
}

/// The name with surrounding whitespace removed; must not be empty.
pub fn check_name(name: &str) -> Result<String, StockError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(NAME_REQUIRED));
    }
    Ok(name.to_string())
}

/// One of the fixed sizes; `missing` is the message used when nothing was chosen.
fn parse_size_or(size: &str, missing: &str) -> Result<Size, StockError> {
    if size.trim().is_empty() {
        return Err(invalid(missing));
    }
    size.parse()
        .map_err(|e: crate::model::ParseSizeError| StockError::Validation(e.to_string()))
}

pub fn check_size(size: &str) -> Result<Size, StockError> {
    parse_size_or(size, SIZE_REQUIRED)
}

/// Digits with at most one decimal point, strictly greater than zero.
pub fn parse_price(price: &str) -> Result<f64, StockError> {
    let price = price.trim();
    let digits = price.replacen('.', "", 1);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(PRICE_INVALID));
    }
    let value: f64 = price.parse().map_err(|_| invalid(PRICE_INVALID))?;
    check_price(value)?;
    Ok(value)
}

pub fn check_price(price: f64) -> Result<(), StockError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(invalid(PRICE_INVALID))
    }
}

/// A non-negative integer string, strictly greater than zero.
pub fn parse_quantity(quantity: &str) -> Result<u32, StockError> {
    let quantity = quantity.trim();
    if quantity.is_empty() || !quantity.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(QUANTITY_INVALID));
    }
    let value: u32 = quantity.parse().map_err(|_| invalid(QUANTITY_INVALID))?;
    check_delta(value)?;
    Ok(value)
}

/// User-entered quantities and deltas must be positive. The resulting stock level
/// may still reach zero through a sale.
pub fn check_delta(delta: u32) -> Result<(), StockError> {
    if delta == 0 {
        return Err(invalid(QUANTITY_INVALID));
    }
    Ok(())
}

/// Re-check an already typed creation payload.
pub fn check_create(params: &StockCreate) -> Result<(), StockError> {
    check_name(&params.name)?;
    check_price(params.price)?;
    check_delta(params.quantity)
}

fn check_selection(name: &str, size: &str) -> Result<StockKey, StockError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(ITEM_NOT_SELECTED));
    }
    let size = parse_size_or(size, SIZE_NOT_SELECTED)?;
    Ok(StockKey::new(name, size))
}

/// Raw fields of the "add stock" screen.
#[derive(Debug, Clone, Default)]
pub struct AddStockForm {
    pub name: String,
    pub size: String,
    pub price: String,
    pub quantity: String,
}

impl AddStockForm {
    pub fn validate(&self) -> Result<StockCreate, StockError> {
        let name = check_name(&self.name)?;
        let size = check_size(&self.size)?;
        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;
        Ok(StockCreate {
            name,
            size,
            price,
            quantity,
        })
    }

    pub fn check(&self) -> (bool, String) {
        verdict(&self.validate())
    }
}

/// Raw fields of the "update quantity" screen.
#[derive(Debug, Clone, Default)]
pub struct QuantityForm {
    pub name: String,
    pub size: String,
    pub operation: String,
    pub quantity: String,
}

impl QuantityForm {
    pub fn validate(&self) -> Result<(StockKey, StockAction), StockError> {
        let key = check_selection(&self.name, &self.size)?;
        let delta = parse_quantity(&self.quantity)?;
        let operation: QuantityOperation = self
            .operation
            .parse()
            .map_err(|e: crate::model::ParseOperationError| StockError::Validation(e.to_string()))?;
        Ok((key, StockAction::new(operation, delta)))
    }

    pub fn check(&self) -> (bool, String) {
        verdict(&self.validate())
    }
}

/// Raw fields of the "update price" screen.
#[derive(Debug, Clone, Default)]
pub struct PriceForm {
    pub name: String,
    pub size: String,
    pub price: String,
}

impl PriceForm {
    pub fn validate(&self) -> Result<(StockKey, PriceUpdate), StockError> {
        let key = check_selection(&self.name, &self.size)?;
        let price = parse_price(&self.price)?;
        Ok((key, PriceUpdate { price }))
    }

    pub fn check(&self) -> (bool, String) {
        verdict(&self.validate())
    }
}
