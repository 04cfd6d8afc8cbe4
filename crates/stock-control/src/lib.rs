//! # Stock Control Library
//!
//! The stock domain on top of [`stock_ledger`]: records keyed by item name and
//! size, validated entry forms, near-duplicate name detection on entry, and
//! quantity and price changes.
//!
//! - **[model]**: plain data ([`StockRecord`](model::StockRecord), [`Size`](model::Size), payloads).
//! - **[stock]**: the ledger rules for stock records and [`StockError`](stock::StockError).
//! - **[validate]**: field checks over raw form input.
//! - **[matcher]**: the similarity score and best-match lookup.
//! - **[reconcile]**: the add-flow decision, with the user's answer injected through [`Confirm`](reconcile::Confirm).
//! - **[clients]**: [`StockClient`](clients::StockClient), the typed API over the ledger.
//! - **[lifecycle]**: [`StockConfig`](lifecycle::StockConfig) and [`StockSession`](lifecycle::StockSession).

pub mod clients;
pub mod lifecycle;
pub mod matcher;
pub mod model;
pub mod reconcile;
pub mod stock;
pub mod validate;
