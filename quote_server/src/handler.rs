//! HTTP surface of the quotation server and the request pipeline behind it.
//!
//! Every `GET /cotacao` walks the same states:
//!
//! ```text
//! Start -> Fetching -> Building -> Persisting -> Responded (200)
//!              \           \            \
//!               +-----------+------------+--> TimedOut (408) | Failed (500)
//! ```
//!
//! The ambient deadline is set when the request arrives. The fetch and
//! persist stages each run under a child deadline derived from it, so the
//! tighter bound always wins. If the HTTP client goes away, axum drops the
//! handler future and with it whichever stage is in flight.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{debug, error, warn};
use quote_common::net::QUOTE_PATH;
use quote_common::{Deadline, QuoteError, Result, Stage};

use crate::config::PipelineBudgets;
use crate::fetcher::RateFetcher;
use crate::model::{Quote, StoredQuote};
use crate::store::QuoteStore;

/// Shared per-process state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upstream rate client.
    pub fetcher: RateFetcher,
    /// Quotation storage opened at startup.
    pub store: QuoteStore,
    /// Deadlines applied to each request.
    pub budgets: PipelineBudgets,
}

/// Build the router serving `GET /cotacao`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(get_quote))
        .with_state(Arc::new(state))
}

async fn get_quote(State(state): State<Arc<AppState>>) -> Response {
    let ambient = Deadline::after(state.budgets.request);
    match run_pipeline(&state, ambient).await {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Fetch, build and persist one quotation under the `ambient` deadline.
pub async fn run_pipeline(state: &AppState, ambient: Deadline) -> Result<StoredQuote> {
    debug!("{}: start ({:?} left)", Stage::Fetch, ambient.remaining());
    let raw = state
        .fetcher
        .fetch(ambient.child(state.budgets.fetch))
        .await?;

    debug!("{}: {} bid={:?}", Stage::Build, raw.code, raw.bid);
    let quote = Quote::try_from(raw)?;

    debug!("{}: start ({:?} left)", Stage::Persist, ambient.remaining());
    let stored = state
        .store
        .save(&quote, ambient.child(state.budgets.persist))
        .await?;

    debug!("quotation {} responded", stored.id);
    Ok(stored)
}

/// Map a pipeline failure to its status code and a short public reason.
fn error_response(err: &QuoteError) -> Response {
    let (status, reason) = match err {
        QuoteError::Timeout(Stage::Fetch) => (
            StatusCode::REQUEST_TIMEOUT,
            "timeout: exchange rate request exceeded its deadline",
        ),
        QuoteError::Timeout(Stage::Persist) => (
            StatusCode::REQUEST_TIMEOUT,
            "timeout: storing the quotation exceeded its deadline",
        ),
        QuoteError::Timeout(_) => (
            StatusCode::REQUEST_TIMEOUT,
            "timeout: request exceeded its deadline",
        ),
        QuoteError::Transport(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to reach the exchange rate service",
        ),
        QuoteError::MalformedData(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "invalid data from the exchange rate service",
        ),
        QuoteError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to store the quotation",
        ),
        QuoteError::Io(_) | QuoteError::Config(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    };

    if err.is_timeout() {
        warn!("Request timed out: {}", err);
    } else {
        error!("Request failed: {}", err);
    }
    (status, reason).into_response()
}
