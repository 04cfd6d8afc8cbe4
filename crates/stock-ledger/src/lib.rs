//! # Stock Ledger
//!
//! Building blocks for small, file-backed record ledgers: a table of records with a
//! natural key, rewritten in full after every change.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`LedgerEntity`]) - the record type, its key, its row codec and
//!    its business rules (create, update, custom actions).
//! 2. **Ledger Layer** ([`Ledger`]) - the load → mutate → save cycle, key lookup,
//!    key uniqueness and logging, written once for every record type.
//! 3. **Storage Layer** ([`TableBackend`]) - header plus rows on disk
//!    ([`CsvTable`]) or in memory ([`mock::MemoryTable`]).
//!
//! ## Example
//!
//! ```rust
//! use stock_ledger::mock::MemoryTable;
//! use stock_ledger::{Ledger, LedgerEntity, LedgerError};
//!
//! #[derive(Clone, Debug)]
//! struct Note { title: String, pinned: bool }
//! #[derive(Debug)] struct NoteCreate { title: String }
//! #[derive(Debug)] struct NoteUpdate { pinned: bool }
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)]
//! enum NoteError { #[error(transparent)] Ledger(#[from] LedgerError) }
//!
//! impl LedgerEntity for Note {
//!     type Key = String;
//!     type Create = NoteCreate;
//!     type Update = NoteUpdate;
//!     type Action = NoteAction;
//!     type ActionResult = ();
//!     type Error = NoteError;
//!     const HEADER: &'static [&'static str] = &["title", "pinned"];
//!
//!     fn key(&self) -> String { self.title.clone() }
//!     fn to_fields(&self) -> Vec<String> {
//!         vec![self.title.clone(), u8::from(self.pinned).to_string()]
//!     }
//!     fn from_fields(fields: &[&str]) -> Result<Self, String> {
//!         match fields {
//!             [title, pinned] => Ok(Self { title: title.to_string(), pinned: *pinned == "1" }),
//!             _ => Err("expected 2 fields".into()),
//!         }
//!     }
//!     fn from_create_params(p: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { title: p.title, pinned: false })
//!     }
//!     fn on_update(&mut self, u: NoteUpdate) -> Result<(), NoteError> {
//!         self.pinned = u.pinned;
//!         Ok(())
//!     }
//!     fn handle_action(&mut self, a: NoteAction) -> Result<(), NoteError> { match a {} }
//! }
//!
//! let ledger: Ledger<Note, _> = Ledger::new(MemoryTable::missing());
//! ledger.create(NoteCreate { title: "groceries".into() }).unwrap();
//! let note = ledger.update(&"groceries".to_string(), NoteUpdate { pinned: true }).unwrap();
//! assert!(note.pinned);
//! assert_eq!(ledger.backend().rows().unwrap(), vec![vec!["groceries".to_string(), "1".to_string()]]);
//! ```
//!
//! ## Concurrency Model
//!
//! Everything is synchronous and single-process. A ledger performs no locking; two
//! writers racing on the same table resolve as last-writer-wins.
//!
//! ## Testing
//!
//! See the [`mock`] module for an in-memory backend with write-failure injection.

pub mod entity;
pub mod error;
pub mod ledger;
pub mod mock;
pub mod table;
pub mod tracing;

pub use self::entity::LedgerEntity;
pub use self::error::LedgerError;
pub use self::ledger::Ledger;
pub use self::table::{CsvTable, Row, TableBackend};
pub use self::tracing::setup_tracing;
