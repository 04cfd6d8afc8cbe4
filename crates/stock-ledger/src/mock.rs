//! # Mock Backend & Testing Guide
//!
//! [`MemoryTable`] implements [`TableBackend`] entirely in memory. It lets tests drive a
//! real [`Ledger`](crate::Ledger) without touching the filesystem, and it can inject
//! failures that are awkward to provoke on a real disk.
//!
//! ## When to use MemoryTable vs CsvTable
//!
//! | Feature | MemoryTable | CsvTable |
//! |---------|-------------|----------|
//! | **Speed** | Instant | Touches the filesystem |
//! | **Error Injection** | Easy (`fail_writes`) | Hard (needs a broken disk) |
//! | **Format coverage** | Rows only | Quoting, header, blank lines |
//! | **Use Case** | Ledger and client logic | On-disk format and end-to-end flows |
//!
//! ## Example
//!
//! ```rust
//! use stock_ledger::mock::MemoryTable;
//! use stock_ledger::TableBackend;
//!
//! let table = MemoryTable::with_rows(vec![vec!["a".to_string(), "1".to_string()]]);
//! table.fail_writes(true);
//! assert!(table.write_rows(&["name", "count"], &[]).is_err());
//!
//! // The failed write left the previous contents in place.
//! assert_eq!(table.rows().unwrap().len(), 1);
//! assert_eq!(table.write_count(), 0);
//! ```

use crate::error::LedgerError;
use crate::table::{Row, TableBackend};
use std::cell::{Cell, RefCell};
use std::io;
use std::path::Path;

/// An in-memory table. `None` contents model a table that does not exist yet.
#[derive(Debug, Default)]
pub struct MemoryTable {
    contents: RefCell<Option<Vec<Vec<String>>>>,
    header: RefCell<Vec<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryTable {
    /// A table that does not exist yet; reads fail with `StorageUnavailable`.
    pub fn missing() -> Self {
        Self::default()
    }

    /// An existing table holding `rows` (header excluded).
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        let table = Self::default();
        table.contents.replace(Some(rows));
        table
    }

    /// Make every subsequent write fail with `StorageWrite` (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Current data rows, or `None` if the table has never been written.
    pub fn rows(&self) -> Option<Vec<Vec<String>>> {
        self.contents.borrow().clone()
    }

    /// Header from the last successful write.
    pub fn header(&self) -> Vec<String> {
        self.header.borrow().clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl TableBackend for MemoryTable {
    fn location(&self) -> &Path {
        Path::new("memory")
    }

    fn exists(&self) -> bool {
        self.contents.borrow().is_some()
    }

    fn read_rows(&self) -> Result<Vec<Row>, LedgerError> {
        let contents = self.contents.borrow();
        let rows = contents
            .as_ref()
            .ok_or_else(|| LedgerError::StorageUnavailable {
                path: self.location().to_path_buf(),
            })?;
        // Line 1 is the header.
        Ok(rows
            .iter()
            .zip(2u64..)
            .filter(|(fields, _)| !fields.iter().all(String::is_empty))
            .map(|(fields, line)| Row {
                line,
                fields: fields.clone(),
            })
            .collect())
    }

    fn write_rows(&self, header: &[&str], rows: &[Vec<String>]) -> Result<(), LedgerError> {
        if self.fail_writes.get() {
            return Err(LedgerError::StorageWrite {
                path: self.location().to_path_buf(),
                source: io::Error::other("injected write failure").into(),
            });
        }
        self.header
            .replace(header.iter().map(|h| h.to_string()).collect());
        self.contents.replace(Some(rows.to_vec()));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
