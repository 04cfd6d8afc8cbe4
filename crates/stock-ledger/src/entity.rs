//! # LedgerEntity Trait
//!
//! The `LedgerEntity` trait is the contract a record type implements to be managed by
//! the generic [`Ledger`](crate::Ledger). It names the natural key, the create and
//! update payloads, the custom actions, and the row codec used by the table backend.
//!
//! # Architecture Note
//! The ledger loop (load, find by key, mutate, save) is written *once* in
//! [`Ledger`](crate::Ledger). Each record type only supplies its business rules
//! through the hooks below. Associated types keep the payloads apart: a price update
//! can only be sent to the record type that declares it.
//!
//! # Provided Methods (Hooks)
//! [`LedgerEntity::on_create`] has a default implementation that does nothing.
//! Override it to validate a freshly built record against the current record set.

use crate::error::LedgerError;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a [`Ledger`](crate::Ledger).
pub trait LedgerEntity: Clone + Debug + Sized {
    /// The natural key. At most one stored record may carry a given key.
    type Key: Eq + Hash + Clone + Display + Debug;

    /// The data required to create a new record.
    type Create: Debug;

    /// The data required to update an existing record.
    type Update: Debug;

    /// Enum representing record-specific operations (e.g. `Sell`).
    type Action: Debug;

    /// The result type returned by custom actions.
    type ActionResult: Debug;

    /// The error type for this record.
    ///
    /// It must absorb [`LedgerError`] so that every ledger operation returns a single
    /// error type to the caller.
    type Error: std::error::Error + From<LedgerError> + 'static;

    /// Column names written as the header row.
    const HEADER: &'static [&'static str];

    /// The key this record is stored under.
    fn key(&self) -> Self::Key;

    /// Encode the record as one table row, in [`Self::HEADER`] order.
    fn to_fields(&self) -> Vec<String>;

    /// Decode one table row. The error string becomes the `reason` of a
    /// [`LedgerError::MalformedRow`].
    fn from_fields(fields: &[&str]) -> Result<Self, String>;

    /// Construct the record from its creation payload.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the record is built and before it is appended.
    fn on_create(&self, _existing: &[Self]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update in place.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Handle a custom record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}
