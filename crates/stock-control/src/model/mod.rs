//! Pure data structures for the stock domain.

pub mod stock;

pub use stock::*;
