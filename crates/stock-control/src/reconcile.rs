//! # Add-flow Reconciliation
//!
//! Decides what an "add stock" submission turns into, given the records already on
//! file:
//!
//! 1. the payload is validated;
//! 2. the candidate name is matched against every existing name;
//! 3. on a match the user is asked, through [`Confirm`], whether they meant the
//!    existing item. Accepting adopts the existing spelling;
//! 4. the resulting `(name, size)` must not be on file yet, whatever the answer was;
//! 5. the new record is built.
//!
//! The reconciler never touches storage. [`StockClient::add_stock`] runs it inside
//! the ledger's load/save cycle.
//!
//! [`StockClient::add_stock`]: crate::clients::StockClient::add_stock

use crate::matcher::{SimilarName, SimilarityMatcher};
use crate::model::{StockCreate, StockRecord};
use crate::stock::StockError;
use crate::validate;
use stock_ledger::LedgerEntity;
use tracing::{debug, info};

/// Asks the user whether a similar existing name is the item they meant.
pub trait Confirm {
    fn confirm(&mut self, suggested_name: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, suggested_name: &str) -> bool {
        self(suggested_name)
    }
}

/// Text of the question put to the user when a similar name is found.
pub fn similar_name_prompt(suggested_name: &str) -> String {
    format!(
        "An item with a similar name '{suggested_name}' already exists. Did you mean to update this item?"
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    matcher: SimilarityMatcher,
}

impl Reconciler {
    pub fn new(matcher: SimilarityMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &SimilarityMatcher {
        &self.matcher
    }

    /// Turn a creation payload into the record to append to `existing`.
    ///
    /// `confirm` is only called when a similar name exists.
    ///
    /// # Errors
    /// * `Validation` if the payload fails a field check.
    /// * `DuplicateKey` if the final `(name, size)` is already on file.
    pub fn resolve(
        &self,
        params: StockCreate,
        existing: &[StockRecord],
        confirm: &mut dyn Confirm,
    ) -> Result<StockRecord, StockError> {
        let mut params = StockCreate {
            name: validate::check_name(&params.name)?,
            ..params
        };
        validate::check_create(&params)?;

        let names = existing.iter().map(|r| r.name.as_str());
        if let Some(SimilarName { name, score }) = self.matcher.best_match(&params.name, names) {
            let accepted = confirm.confirm(&name);
            debug!(candidate = %params.name, suggested = %name, score, accepted, "Similar name");
            if accepted {
                params.name = name;
            }
        }

        if let Some(clash) = existing
            .iter()
            .find(|r| r.name == params.name && r.size == params.size)
        {
            return Err(StockError::DuplicateKey(clash.key()));
        }

        let record = StockRecord::from_create_params(params)?;
        info!(key = %record.key(), quantity = record.quantity, "Resolved new record");
        Ok(record)
    }
}
