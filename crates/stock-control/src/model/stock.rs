use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The fixed set of garment sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::XS, Size::S, Size::M, Size::L, Size::XL];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Size must be one of XS, S, M, L, XL.")]
pub struct ParseSizeError(pub String);

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSizeError(s.to_string()))
    }
}

/// The natural key of a record: at most one record exists per `(name, size)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockKey {
    pub name: String,
    pub size: Size,
}

impl StockKey {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid item key: {0}")]
pub struct ParseKeyError(pub String);

/// Inverse of `Display`: `"<name> (<size>)"`. The size is the last parenthesized part.
impl FromStr for StockKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, size) = s
            .strip_suffix(')')
            .and_then(|rest| rest.rsplit_once(" ("))
            .ok_or_else(|| ParseKeyError(s.to_string()))?;
        let size: Size = size.parse().map_err(|_| ParseKeyError(s.to_string()))?;
        Ok(StockKey::new(name, size))
    }
}

/// Represents one stock line: an item at a given size.
///
/// # Ledger
/// This struct implements the [`LedgerEntity`](stock_ledger::LedgerEntity) trait,
/// allowing it to be managed by a [`Ledger`](stock_ledger::Ledger).
///
/// See [`impl LedgerEntity for StockRecord`](#impl-LedgerEntity-for-StockRecord) for details on:
/// - Creation parameters ([`StockCreate`])
/// - Update parameters ([`PriceUpdate`])
/// - Custom actions ([`StockAction`](crate::stock::StockAction))
///
/// `available` is not stored; see [`StockRecord::is_available`].
#[derive(Debug, Clone, PartialEq)]
pub struct StockRecord {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub size: Size,
}

impl StockRecord {
    /// Creates a new StockRecord instance.
    ///
    /// # Arguments
    /// * `name` - Item name
    /// * `size` - Item size
    /// * `price` - Unit price
    /// * `quantity` - Units in stock
    pub fn new(name: impl Into<String>, size: Size, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            size,
        }
    }

    pub fn key(&self) -> StockKey {
        StockKey::new(self.name.clone(), self.size)
    }

    /// Availability is derived: a record is available exactly when it has stock.
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

impl Serialize for StockRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StockRecord", 5)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("available", &self.is_available())?;
        state.end()
    }
}

/// Render a price the way the ledger file stores it.
///
/// Whole prices keep one fractional digit (`10.0`); others use the shortest form
/// that parses back to the same value.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}

/// Payload for creating a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct StockCreate {
    pub name: String,
    pub size: Size,
    pub price: f64,
    pub quantity: u32,
}

// DTO for price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub price: f64,
}

/// Direction of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityOperation {
    Restock,
    Sell,
}

impl Display for QuantityOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuantityOperation::Restock => "Add Copies",
            QuantityOperation::Sell => "Sell Copies",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid operation selected.")]
pub struct ParseOperationError(pub String);

impl FromStr for QuantityOperation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add copies" | "add" | "restock" => Ok(QuantityOperation::Restock),
            "sell copies" | "sell" => Ok(QuantityOperation::Sell),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}
