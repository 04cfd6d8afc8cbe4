use super::config::StockConfig;
use crate::clients::StockClient;
use crate::matcher::SimilarityMatcher;
use crate::model::{format_price, StockRecord};
use crate::reconcile::Confirm;
use crate::stock::StockError;
use crate::validate::{AddStockForm, PriceForm, QuantityForm};
use stock_ledger::{CsvTable, TableBackend};
use tracing::{info, warn};

/// Shown by the availability view when nothing is in stock.
pub const NO_AVAILABLE_ITEMS: &str = "No available items in stock.";

const SEPARATOR_WIDTH: usize = 40;

/// Outcome of a successful form submission.
#[derive(Debug)]
pub struct Submission {
    /// Success message for the user.
    pub message: String,
    /// Set when the ledger did not exist before the submission ran. A mutation
    /// still proceeds from an empty ledger, but the user is told.
    pub notice: Option<StockError>,
}

impl Submission {
    fn new(message: String, notice: Option<StockError>) -> Self {
        Self { message, notice }
    }
}

/// One interactive session over a stock ledger.
///
/// Holds everything the screens share, so no process-wide state is needed. Each
/// `submit_*` method takes the raw form, runs the full operation and returns a
/// [`Submission`] on success.
pub struct StockSession<B = CsvTable> {
    config: StockConfig,
    client: StockClient<B>,
}

impl StockSession<CsvTable> {
    /// A session over the CSV ledger named in `config`.
    pub fn open(config: StockConfig) -> Self {
        let backend = CsvTable::new(config.ledger_path.clone());
        Self::with_backend(config, backend)
    }
}

impl<B: TableBackend> StockSession<B> {
    pub fn with_backend(config: StockConfig, backend: B) -> Self {
        let matcher = SimilarityMatcher::new(config.similarity_cutoff);
        info!(
            ledger = %backend.location().display(),
            cutoff = matcher.cutoff(),
            "Session started"
        );
        Self {
            client: StockClient::new(backend, matcher),
            config,
        }
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    pub fn client(&self) -> &StockClient<B> {
        &self.client
    }

    /// "Add stock" screen.
    pub fn submit_add(
        &self,
        form: &AddStockForm,
        confirm: &mut dyn Confirm,
    ) -> Result<Submission, StockError> {
        let params = form.validate()?;
        let notice = self.missing_ledger();
        let record = self
            .client
            .add_stock(params, confirm)
            .inspect_err(|e| warn!(error = %e, "Add rejected"))?;
        Ok(Submission::new(format!("Added new stock item: {}.", record.key()), notice))
    }

    /// "Update quantity" screen.
    pub fn submit_quantity(&self, form: &QuantityForm) -> Result<Submission, StockError> {
        let (key, action) = form.validate()?;
        let notice = self.missing_ledger();
        self.client
            .adjust_quantity(&key, action)
            .inspect_err(|e| warn!(error = %e, "Quantity update rejected"))?;
        Ok(Submission::new(format!("Updated quantity for {key}."), notice))
    }

    /// "Update price" screen.
    pub fn submit_price(&self, form: &PriceForm) -> Result<Submission, StockError> {
        let (key, update) = form.validate()?;
        let notice = self.missing_ledger();
        self.client
            .set_price(&key, update.price)
            .inspect_err(|e| warn!(error = %e, "Price update rejected"))?;
        Ok(Submission::new(format!("Updated price for {key}."), notice))
    }

    /// `StorageUnavailable` when the ledger has not been created yet.
    fn missing_ledger(&self) -> Option<StockError> {
        let backend = self.client.ledger().backend();
        (!backend.exists()).then(|| StockError::StorageUnavailable {
            path: backend.location().to_path_buf(),
        })
    }

    /// "View available items" screen.
    pub fn view_available(&self) -> Result<String, StockError> {
        Ok(render_available(&self.client.available_items()?))
    }
}

/// Text listing of `records`, one block per record.
pub fn render_available(records: &[StockRecord]) -> String {
    if records.is_empty() {
        return NO_AVAILABLE_ITEMS.to_string();
    }
    let separator = "-".repeat(SEPARATOR_WIDTH);
    records
        .iter()
        .map(|r| {
            format!(
                "Name: {}\nQuantity: {}\nPrice: ${}\nSize: {}\n{separator}\n",
                r.name,
                r.quantity,
                format_price(r.price),
                r.size
            )
        })
        .collect()
}
