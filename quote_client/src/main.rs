//! Quotation Client — asks the quotation server for the current USD-BRL bid
//! under a fixed deadline and writes it to a local text file.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --server-url http://127.0.0.1:8080/cotacao --timeout-ms 300 --output cotacao.txt
//! ```
//!
//! The output file holds exactly one line, `Dólar: <bid with 4 decimals>`.
//! If the request times out or fails, the file is left untouched and the
//! process exits with a non-zero status.
#![warn(missing_docs)]
mod args;
mod model;
mod output;
mod requester;

use crate::args::Args;
use crate::requester::QuoteRequester;
use clap::Parser;
use log::{error, info, warn};
use quote_common::{Deadline, QuoteError, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

async fn run(args: &Args) -> Result<f64> {
    let requester = QuoteRequester::new(&args.server_url);
    let deadline = Deadline::after(Duration::from_millis(args.timeout_ms));
    let bid = requester.fetch_bid(deadline).await?;
    output::write_quote(&normalize_path(&args.output), bid)?;
    Ok(bid)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(&args).await {
        Ok(bid) => {
            info!("{}", output::format_line(bid));
            ExitCode::SUCCESS
        }
        Err(QuoteError::Timeout(stage)) => {
            warn!("Request timeout ({} stage).", stage);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Failed to obtain quotation: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
