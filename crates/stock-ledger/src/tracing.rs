//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter for the whole
//! process. Every ledger operation logs through `tracing` with an `entity_type` field
//! and the record key, so a session reads as a short list of structured lines:
//!
//! ```text
//! WARN Starting from an empty table entity_type="StockRecord" error=Table not found: stock.csv
//! INFO Created entity_type="StockRecord" key=Red Shirt (S) size=1
//! INFO Action ok entity_type="StockRecord" key=Red Shirt (S) result=StockLevel { quantity: 2, available: true }
//! ```
//!
//! ## Configuration
//!
//! Verbosity comes from `RUST_LOG` and defaults to `warn`:
//!
//! ```bash
//! RUST_LOG=info stock-control view
//! RUST_LOG=stock_ledger=debug stock-control sell --name "Red Shirt" --size S --quantity 1
//! ```
//!
//! With `debug`, each operation also logs its full payload once on entry
//! (`debug!(?update, "Update")`).
//!
//! Output goes to stderr so that command output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false) // entity_type already says where a line came from
        .compact()
        .init();
}
