//! # Generic Ledger
//!
//! [`Ledger`] runs every operation as one complete cycle against its backend:
//! load the full record set, apply a single change, write the full set back. No
//! records are cached between calls, so each operation sees whatever the table
//! holds at that moment.
//!
//! ## Operations
//!
//! * **Create**: build the record (optionally looking at the current set), reject it
//!   if its key is already stored, append it, save.
//! * **Get / List**: load and return.
//! * **Update**: find the first record with the key, run [`LedgerEntity::on_update`], save.
//! * **Action**: find the first record with the key, run [`LedgerEntity::handle_action`], save.
//!
//! A failing hook or a failing save leaves the table exactly as it was; the modified
//! in-memory copy is dropped.
//!
//! A missing table is soft for mutating operations: it is logged and treated as an
//! empty record set, so the first create brings the table into existence.

use crate::entity::LedgerEntity;
use crate::error::LedgerError;
use crate::table::{CsvTable, TableBackend};
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// A ledger of `T` records persisted through backend `B`.
pub struct Ledger<T, B = CsvTable> {
    backend: B,
    _entity: PhantomData<fn() -> T>,
}

impl<T: LedgerEntity, B: TableBackend> Ledger<T, B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            _entity: PhantomData,
        }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // Extract just the type name (e.g. "StockRecord" instead of the full path)
    fn entity_type() -> &'static str {
        std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
    }

    /// Load every record.
    ///
    /// Fails with [`LedgerError::StorageUnavailable`] when the table does not exist and
    /// with [`LedgerError::MalformedRow`] on the first row that cannot be decoded.
    pub fn load(&self) -> Result<Vec<T>, LedgerError> {
        let rows = self.backend.read_rows()?;
        let records = rows
            .into_iter()
            .map(|row| {
                let fields: Vec<&str> = row.fields.iter().map(String::as_str).collect();
                T::from_fields(&fields).map_err(|reason| LedgerError::MalformedRow {
                    line: row.line,
                    reason,
                })
            })
            .collect::<Result<Vec<T>, _>>()?;
        debug!(
            entity_type = Self::entity_type(),
            location = %self.backend.location().display(),
            size = records.len(),
            "Loaded"
        );
        Ok(records)
    }

    /// Rewrite the table: header row, then one row per record.
    pub fn save(&self, records: &[T]) -> Result<(), LedgerError> {
        let rows: Vec<Vec<String>> = records.iter().map(T::to_fields).collect();
        self.backend.write_rows(T::HEADER, &rows)
    }

    fn snapshot(&self) -> Result<Vec<T>, LedgerError> {
        match self.load() {
            Err(e) if e.is_unavailable() => {
                warn!(entity_type = Self::entity_type(), error = %e, "Starting from an empty table");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn commit(&self, records: &[T]) -> Result<(), LedgerError> {
        self.save(records).inspect_err(|e| {
            warn!(entity_type = Self::entity_type(), error = %e, "Save failed, change discarded");
        })
    }

    /// Return every record in table order.
    pub fn list(&self) -> Result<Vec<T>, T::Error> {
        Ok(self.load()?)
    }

    /// Return the first record stored under `key`, if any.
    pub fn get(&self, key: &T::Key) -> Result<Option<T>, T::Error> {
        let item = self.load()?.into_iter().find(|r| &r.key() == key);
        debug!(entity_type = Self::entity_type(), %key, found = item.is_some(), "Get");
        Ok(item)
    }

    /// Create a record from its creation payload.
    pub fn create(&self, params: T::Create) -> Result<T, T::Error> {
        debug!(entity_type = Self::entity_type(), ?params, "Create");
        self.create_with(|_| T::from_create_params(params))
    }

    /// Create a record with a builder that sees the current record set.
    ///
    /// The builder runs inside the load/save cycle, so its decision and the append
    /// are based on the same snapshot.
    pub fn create_with<F>(&self, build: F) -> Result<T, T::Error>
    where
        F: FnOnce(&[T]) -> Result<T, T::Error>,
    {
        let entity_type = Self::entity_type();
        let mut records = self.snapshot()?;

        let item = build(records.as_slice())
            .and_then(|item| item.on_create(&records).map(|()| item))
            .inspect_err(|e| warn!(entity_type, error = %e, "Create failed"))?;

        let key = item.key();
        if records.iter().any(|r| r.key() == key) {
            warn!(entity_type, %key, "Duplicate key");
            return Err(LedgerError::DuplicateKey(key.to_string()).into());
        }

        records.push(item.clone());
        self.commit(&records)?;
        info!(entity_type, %key, size = records.len(), "Created");
        Ok(item)
    }

    /// Apply an update to the record stored under `key` and return its new state.
    pub fn update(&self, key: &T::Key, update: T::Update) -> Result<T, T::Error> {
        let entity_type = Self::entity_type();
        debug!(entity_type, %key, ?update, "Update");
        let mut records = self.snapshot()?;

        let Some(item) = records.iter_mut().find(|r| &r.key() == key) else {
            warn!(entity_type, %key, "Not found");
            return Err(LedgerError::NotFound(key.to_string()).into());
        };
        item.on_update(update)
            .inspect_err(|e| warn!(entity_type, %key, error = %e, "Update failed"))?;
        let updated = item.clone();

        self.commit(&records)?;
        info!(entity_type, %key, "Updated");
        Ok(updated)
    }

    /// Run a custom action against the record stored under `key`.
    pub fn act(&self, key: &T::Key, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let entity_type = Self::entity_type();
        debug!(entity_type, %key, ?action, "Action");
        let mut records = self.snapshot()?;

        let Some(item) = records.iter_mut().find(|r| &r.key() == key) else {
            warn!(entity_type, %key, "Not found");
            return Err(LedgerError::NotFound(key.to_string()).into());
        };
        let result = item
            .handle_action(action)
            .inspect_err(|e| warn!(entity_type, %key, error = %e, "Action failed"))?;

        self.commit(&records)?;
        info!(entity_type, %key, ?result, "Action ok");
        Ok(result)
    }
}
