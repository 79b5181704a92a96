//! Command-line arguments for the quotation client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the quotation endpoint.
    #[clap(long, default_value = "http://127.0.0.1:8080/cotacao")]
    pub server_url: String,

    /// Deadline for the whole request, in milliseconds.
    #[clap(long, default_value_t = 300)]
    pub timeout_ms: u64,

    /// File the formatted quotation is written to.
    #[clap(long, default_value = "cotacao.txt")]
    pub output: String,
}
