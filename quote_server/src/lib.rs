//! Quotation HTTP server.
//!
//! On every `GET /cotacao` the server fetches the current USD-BRL rate from an
//! upstream API, validates it into a `Quote`, stores it in SQLite and answers
//! with the stored quotation as JSON. Each I/O stage runs under a deadline
//! derived from the request's own deadline:
//!
//! - `fetcher` — `RateFetcher`, the outbound call to the rate API.
//! - `model` — `RawRate` (upstream text), `Quote` and `StoredQuote`.
//! - `store` — `QuoteStore`, the SQLite persistence writer.
//! - `handler` — the router and the fetch → build → persist pipeline.
//! - `config` — command line arguments and stage budgets.
#![warn(missing_docs)]
pub mod config;
pub mod fetcher;
pub mod handler;
pub mod model;
pub mod store;

use log::info;
use tokio::net::TcpListener;

pub use handler::{AppState, app};

/// Serve the quotation router on `listener` until the process exits.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    info!("Quotation server listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await
}
