//! Command line configuration for the quotation server.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_common::net::SERVER_PORT;
use quote_common::{QuoteError, Result};

use crate::fetcher::DEFAULT_RATE_URL;
use crate::store::DEFAULT_DATABASE;

/// Ambient deadline for one inbound request, matching the client's allowance.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 300;
/// Budget for the upstream rate fetch.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 200;
/// Budget for the durable write.
pub const DEFAULT_PERSIST_TIMEOUT_MS: u64 = 10;

/// Quotation server arguments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serves the current USD-BRL quotation over HTTP")]
pub struct Args {
    /// Address to bind the HTTP listener to.
    #[clap(long, default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Port to bind the HTTP listener to.
    #[clap(long, default_value_t = SERVER_PORT)]
    pub port: u16,

    /// Exchange-rate API endpoint.
    #[clap(long, default_value = DEFAULT_RATE_URL)]
    pub upstream_url: String,

    /// SQLite database file.
    #[clap(long, default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Deadline for handling one request, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,

    /// Budget for the upstream fetch, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_FETCH_TIMEOUT_MS)]
    pub fetch_timeout_ms: u64,

    /// Budget for the database write, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_PERSIST_TIMEOUT_MS)]
    pub persist_timeout_ms: u64,
}

impl Args {
    /// Stage budgets described by the arguments.
    pub fn budgets(&self) -> Result<PipelineBudgets> {
        if self.request_timeout_ms == 0 {
            return Err(QuoteError::Config(
                "--request-timeout-ms must be greater than zero".to_string(),
            ));
        }
        Ok(PipelineBudgets {
            request: Duration::from_millis(self.request_timeout_ms),
            fetch: Duration::from_millis(self.fetch_timeout_ms),
            persist: Duration::from_millis(self.persist_timeout_ms),
        })
    }
}

/// Time allowances of the request pipeline.
///
/// `fetch` and `persist` are nested inside `request`: each stage gets
/// `min(request time left, stage budget)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineBudgets {
    /// Ambient deadline for the whole request.
    pub request: Duration,
    /// Upstream fetch budget.
    pub fetch: Duration,
    /// Persistence budget.
    pub persist: Duration,
}

impl Default for PipelineBudgets {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            fetch: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            persist: Duration::from_millis(DEFAULT_PERSIST_TIMEOUT_MS),
        }
    }
}
