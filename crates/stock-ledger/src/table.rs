//! # Table Backends
//!
//! A [`TableBackend`] owns the on-disk (or in-memory) representation of a ledger:
//! a header row followed by one row per record. Backends know nothing about record
//! types; they move rows of strings in and out. Every write replaces the whole table.
//!
//! - [`CsvTable`]: the production backend, a comma-separated file.
//! - [`MemoryTable`](crate::mock::MemoryTable): an in-memory backend for tests.

use crate::error::LedgerError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// One decoded data row together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Storage seam used by [`Ledger`](crate::Ledger).
pub trait TableBackend {
    /// Where the table lives, for log lines and error messages.
    fn location(&self) -> &Path;

    /// Whether the table has been created yet.
    fn exists(&self) -> bool;

    /// Read every data row. The header row and blank rows are skipped.
    ///
    /// Fails with [`LedgerError::StorageUnavailable`] when the table does not exist.
    fn read_rows(&self) -> Result<Vec<Row>, LedgerError>;

    /// Replace the table with `header` followed by `rows`.
    fn write_rows(&self, header: &[&str], rows: &[Vec<String>]) -> Result<(), LedgerError>;
}

/// A ledger table stored as a CSV file.
///
/// No locking is performed. The file is assumed to be used by one process at a time,
/// and a concurrent external edit between a load and the matching save is lost.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_error(&self, source: csv::Error) -> LedgerError {
        LedgerError::StorageRead {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> LedgerError {
        LedgerError::StorageWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl TableBackend for CsvTable {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_rows(&self) -> Result<Vec<Row>, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LedgerError::StorageUnavailable {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.read_error(e.into())),
        };

        // The first row is always the header, whatever it says.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| self.read_error(e))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map_or(0, |pos| pos.line());
            rows.push(Row {
                line,
                fields: record.iter().map(str::to_owned).collect(),
            });
        }
        Ok(rows)
    }

    fn write_rows(&self, header: &[&str], rows: &[Vec<String>]) -> Result<(), LedgerError> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| self.write_error(e))?;
        writer
            .write_record(header)
            .map_err(|e| self.write_error(e))?;
        for row in rows {
            writer.write_record(row).map_err(|e| self.write_error(e))?;
        }
        writer.flush().map_err(|e| self.write_error(e.into()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &[&str] = &["name", "quantity", "price", "size", "available"];

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("stock.csv"));

        assert!(!table.exists());
        let err = table.read_rows().unwrap_err();
        assert!(err.is_unavailable());

        table.write_rows(HEADER, &[]).unwrap();
        assert!(table.exists());
    }

    #[test]
    fn test_header_and_blank_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        fs::write(
            &path,
            "name,quantity,price,size,available\nRed Shirt,5,10.0,S,1\n\nBlue Hat,0,4.5,M,0\n",
        )
        .unwrap();

        let rows = CsvTable::new(&path).read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["Red Shirt", "5", "10.0", "S", "1"]);
        assert_eq!(rows[1].fields[0], "Blue Hat");
        assert_eq!(rows[0].line, 2);
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        fs::write(&path, "name,quantity,price,size,available\nOld,1,1.0,S,1\n").unwrap();

        let table = CsvTable::new(&path);
        let rows = vec![vec![
            "Red, Shirt".to_string(),
            "3".to_string(),
            "12.5".to_string(),
            "L".to_string(),
            "1".to_string(),
        ]];
        table.write_rows(HEADER, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("name,quantity,price,size,available\n"));
        assert!(!text.contains("Old"));

        // Embedded commas survive through quoting.
        let back = table.read_rows().unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].fields, rows[0]);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        fs::write(&path, "name,quantity,price,size,available\n").unwrap();

        assert!(CsvTable::new(&path).read_rows().unwrap().is_empty());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("missing").join("stock.csv"));

        let err = table.write_rows(HEADER, &[]).unwrap_err();
        assert!(matches!(err, LedgerError::StorageWrite { .. }));
    }
}
