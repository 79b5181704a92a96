//! External exchange-rate fetcher.
//!
//! `RateFetcher` performs exactly one `GET` against the rate API per call and
//! decodes the `USDBRL` entry into a `RawRate`. The request and the body read
//! both run under the deadline handed in by the request handler; when it
//! fires, the in-flight request is dropped and `QuoteError::Timeout` is
//! returned. No retries.

use log::debug;
use quote_common::{Deadline, QuoteError, Result, Stage};
use reqwest::Client;

use crate::model::{RatePayload, RawRate};

/// Public USD-BRL endpoint of the AwesomeAPI exchange-rate service.
pub const DEFAULT_RATE_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Client for the upstream exchange-rate API.
#[derive(Debug, Clone)]
pub struct RateFetcher {
    client: Client,
    url: String,
}

impl RateFetcher {
    /// Create a fetcher for the rate API at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Fetch the current USD-BRL rate within `deadline`.
    pub async fn fetch(&self, deadline: Deadline) -> Result<RawRate> {
        debug!(
            "Fetching exchange rate from {} ({:?} left)",
            self.url,
            deadline.remaining()
        );
        deadline.run(Stage::Fetch, self.fetch_unbounded()).await
    }

    async fn fetch_unbounded(&self) -> Result<RawRate> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Transport(format!(
                "rate API answered with status {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(classify_reqwest_error)?;
        let payload: RatePayload = serde_json::from_slice(&body).map_err(|e| {
            QuoteError::MalformedData(format!("unexpected rate API payload: {}", e))
        })?;
        Ok(payload.usd_brl)
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        QuoteError::Timeout(Stage::Fetch)
    } else if err.is_decode() {
        QuoteError::MalformedData(err.to_string())
    } else {
        QuoteError::Transport(err.to_string())
    }
}
