//! # Stock Control
//!
//! Command-line front end for the stock ledger. Each subcommand is one screen of
//! the stock workflow:
//!
//! - `add` - register a new item at a size (asks before reusing a similar name)
//! - `restock` / `sell` - adjust the quantity of an existing item
//! - `price` - set the unit price of an existing item
//! - `view` - list the items that are in stock
//! - `items` - list item names, or the sizes on file for one name
//!
//! Results go to stdout, errors and logs to stderr.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use stock_control::lifecycle::{
    StockConfig, StockSession, Submission, DEFAULT_LEDGER_PATH, NO_AVAILABLE_ITEMS,
};
use stock_control::matcher::DEFAULT_CUTOFF;
use stock_control::model::QuantityOperation;
use stock_control::reconcile::{similar_name_prompt, Confirm};
use stock_control::stock::StockError;
use stock_control::validate::{AddStockForm, PriceForm, QuantityForm};
use stock_ledger::setup_tracing;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "stock-control")]
#[command(about = "Keep track of stock levels and prices")]
#[command(version)]
struct Cli {
    /// Stock ledger file
    #[arg(long, value_name = "PATH", env = "STOCK_LEDGER", default_value = DEFAULT_LEDGER_PATH)]
    ledger: PathBuf,

    /// Minimum similarity score (0-100) before asking about a similar name
    #[arg(
        long,
        value_name = "N",
        env = "STOCK_SIMILARITY_CUTOFF",
        default_value_t = DEFAULT_CUTOFF,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    cutoff: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new item at a size
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        quantity: String,
        /// Accept a similar existing name without asking
        #[arg(long, conflicts_with = "no")]
        yes: bool,
        /// Keep the typed name without asking
        #[arg(long)]
        no: bool,
    },
    /// Add units to an existing item
    Restock {
        #[arg(long)]
        name: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        quantity: String,
    },
    /// Remove sold units from an existing item
    Sell {
        #[arg(long)]
        name: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        quantity: String,
    },
    /// Set the unit price of an existing item
    Price {
        #[arg(long)]
        name: String,
        #[arg(long)]
        size: String,
        #[arg(long)]
        price: String,
    },
    /// List the items that are in stock
    View {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List item names, or the sizes on file for one item
    Items {
        #[arg(long)]
        name: Option<String>,
    },
}

/// Asks on the terminal. Anything but `y`/`yes` is a no.
struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, suggested_name: &str) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", similar_name_prompt(suggested_name));
        let _ = stderr.flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// A fixed answer from `--yes` / `--no`.
struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&mut self, suggested_name: &str) -> bool {
        debug!(suggested_name, answer = self.0, "Answering from flags");
        self.0
    }
}

fn quantity_form(name: String, size: String, operation: QuantityOperation, quantity: String) -> QuantityForm {
    QuantityForm {
        name,
        size,
        operation: operation.to_string(),
        quantity,
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error("Failed to encode items as JSON")]
    Json(#[from] serde_json::Error),
}

/// `e` followed by each of its causes, separated by `": "`.
fn render_error(e: &dyn Error) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn output(message: String) -> Submission {
    Submission {
        message,
        notice: None,
    }
}

fn run(session: &StockSession, command: Command) -> Result<Submission, CliError> {
    match command {
        Command::Add {
            name,
            size,
            price,
            quantity,
            yes,
            no,
        } => {
            let form = AddStockForm {
                name,
                size,
                price,
                quantity,
            };
            let mut confirm: Box<dyn Confirm> = match (yes, no) {
                (true, _) => Box::new(Answer(true)),
                (_, true) => Box::new(Answer(false)),
                _ => Box::new(StdinPrompt),
            };
            Ok(session.submit_add(&form, &mut *confirm)?)
        }
        Command::Restock { name, size, quantity } => Ok(session.submit_quantity(
            &quantity_form(name, size, QuantityOperation::Restock, quantity),
        )?),
        Command::Sell { name, size, quantity } => Ok(session.submit_quantity(
            &quantity_form(name, size, QuantityOperation::Sell, quantity),
        )?),
        Command::Price { name, size, price } => {
            Ok(session.submit_price(&PriceForm { name, size, price })?)
        }
        Command::View { json: false } => Ok(output(session.view_available()?)),
        Command::View { json: true } => {
            let items = session.client().available_items()?;
            Ok(output(serde_json::to_string_pretty(&items)?))
        }
        Command::Items { name: None } => Ok(output(session.client().item_names()?.join("\n"))),
        Command::Items { name: Some(name) } => Ok(output(
            session
                .client()
                .sizes_for(&name)?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )),
    }
}

/// What a read-only screen shows when the ledger file does not exist yet.
fn empty_view(command: &Command) -> String {
    match command {
        Command::View { json: true } => "[]".to_string(),
        Command::View { json: false } => NO_AVAILABLE_ITEMS.to_string(),
        _ => String::new(),
    }
}

fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    let config = StockConfig::default()
        .with_ledger_path(cli.ledger)
        .with_similarity_cutoff(cli.cutoff);
    let session = StockSession::open(config);

    let read_only = matches!(cli.command, Command::View { .. } | Command::Items { .. });
    let fallback = empty_view(&cli.command);

    match run(&session, cli.command) {
        Ok(Submission { message, notice }) => {
            if let Some(notice) = notice {
                eprintln!("{notice}");
            }
            if !message.is_empty() {
                println!("{message}");
            }
            ExitCode::SUCCESS
        }
        // A missing ledger is reported, then shown as empty.
        Err(CliError::Stock(e)) if read_only && e.is_unavailable() => {
            eprintln!("{e}");
            if !fallback.is_empty() {
                println!("{fallback}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_ledger::LedgerError;

    #[test]
    fn test_render_error_names_each_cause_once() {
        let e = CliError::from(StockError::from(LedgerError::MalformedRow {
            line: 4,
            reason: "invalid price".into(),
        }));
        assert_eq!(
            render_error(&e),
            "Failed to read the stock file: Malformed row at line 4: invalid price"
        );
    }

    #[test]
    fn test_render_error_without_cause() {
        let e = CliError::from(StockError::Validation("Price must be positive.".into()));
        assert_eq!(render_error(&e), "Price must be positive.");
    }
}
