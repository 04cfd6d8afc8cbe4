//! Session configuration.

use crate::matcher::DEFAULT_CUTOFF;
use std::path::PathBuf;

pub const DEFAULT_LEDGER_PATH: &str = "stock.csv";

/// Where the ledger lives and how eagerly similar names are flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockConfig {
    pub ledger_path: PathBuf,
    /// Minimum similarity score, `0..=100`, for the add flow to ask about a name.
    pub similarity_cutoff: u8,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            similarity_cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl StockConfig {
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    pub fn with_similarity_cutoff(mut self, cutoff: u8) -> Self {
        self.similarity_cutoff = cutoff;
        self
    }
}
