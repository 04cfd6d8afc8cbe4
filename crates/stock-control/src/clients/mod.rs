//! Typed wrappers around [`Ledger`](stock_ledger::Ledger).

pub mod stock_client;

pub use stock_client::*;
