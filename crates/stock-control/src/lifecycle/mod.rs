//! # Session Lifecycle
//!
//! This module wires the stock system together for one interactive session: it
//! turns a [`StockConfig`] into a [`StockSession`] holding the ledger client and the
//! similarity settings, and maps each screen's form submission onto a client call.
//!
//! ## The Session Pattern
//!
//! Screens never share globals. They receive the session and call one method per
//! user action:
//!
//! ```rust,no_run
//! use stock_control::lifecycle::{StockConfig, StockSession};
//! use stock_control::validate::AddStockForm;
//!
//! let session = StockSession::open(StockConfig::default());
//! let form = AddStockForm {
//!     name: "Red Shirt".into(),
//!     size: "M".into(),
//!     price: "10".into(),
//!     quantity: "3".into(),
//! };
//! match session.submit_add(&form, &mut |suggested: &str| suggested == "Red Shirt") {
//!     Ok(submission) => println!("{}", submission.message),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! Every operation is one synchronous load → mutate → save cycle. A failure is
//! returned once as a [`StockError`](crate::stock::StockError) and leaves the
//! session usable.
//!
//! ## Observability
//!
//! Install [`setup_tracing`](stock_ledger::setup_tracing) once at startup; verbosity
//! comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info stock-control view     # one line per change
//! RUST_LOG=debug stock-control view    # full payloads
//! ```

pub mod config;
pub mod stock_system;

pub use config::*;
pub use stock_system::*;
