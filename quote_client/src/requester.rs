//! Requesting the current quotation from the server.
//!
//! Connect, send and body read all run under one deadline. When it fires the
//! request is dropped and `QuoteError::Timeout(Stage::Request)` is returned.
use log::{debug, warn};
use quote_common::{Deadline, QuoteError, Result, Stage};
use reqwest::{Client, StatusCode};

use crate::model::quote::QuoteBid;

/// Helper type for calling the quotation endpoint.
pub struct QuoteRequester {
    client: Client,
    url: String,
}

impl QuoteRequester {
    /// Create a requester for the endpoint at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Request the quotation and decode its bid within `deadline`.
    pub async fn fetch_bid(&self, deadline: Deadline) -> Result<f64> {
        debug!("GET {} ({:?} left)", self.url, deadline.remaining());
        deadline.run(Stage::Request, self.request()).await
    }

    async fn request(&self) -> Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        if status == StatusCode::REQUEST_TIMEOUT {
            warn!(
                "Server reported a timeout: {}",
                String::from_utf8_lossy(&body)
            );
            return Err(QuoteError::Timeout(Stage::Request));
        }
        if !status.is_success() {
            return Err(QuoteError::Transport(format!(
                "server answered {}: {}",
                status,
                String::from_utf8_lossy(&body)
            )));
        }

        let quote: QuoteBid = serde_json::from_slice(&body).map_err(|e| {
            QuoteError::MalformedData(format!("unexpected quotation payload: {}", e))
        })?;
        Ok(quote.bid)
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> QuoteError {
    if err.is_timeout() {
        QuoteError::Timeout(Stage::Request)
    } else {
        QuoteError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode as AxumStatus, routing::get};
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/cotacao", addr)
    }

    #[tokio::test]
    async fn decodes_bid() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async {
                r#"{"code":"USD","name":"Dólar","bid":5.4321,"quotated_at":"2024-01-01T12:00:00Z"}"#
            }),
        );
        let requester = QuoteRequester::new(serve(router).await);

        let bid = requester
            .fetch_bid(Deadline::after(Duration::from_secs(2)))
            .await
            .unwrap();
        assert_eq!(bid, 5.4321);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"bid":1.0}"#
            }),
        );
        let requester = QuoteRequester::new(serve(router).await);

        let err = requester
            .fetch_bid(Deadline::after(Duration::from_millis(50)))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Timeout(Stage::Request)));
    }

    #[tokio::test]
    async fn server_408_is_a_timeout() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async { (AxumStatus::REQUEST_TIMEOUT, "timeout") }),
        );
        let requester = QuoteRequester::new(serve(router).await);

        let err = requester
            .fetch_bid(Deadline::after(Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn server_500_is_transport_failure() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "failed") }),
        );
        let requester = QuoteRequester::new(serve(router).await);

        let err = requester
            .fetch_bid(Deadline::after(Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Transport(_)));
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed_data() {
        let router = Router::new().route("/cotacao", get(|| async { "not json" }));
        let requester = QuoteRequester::new(serve(router).await);

        let err = requester
            .fetch_bid(Deadline::after(Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::MalformedData(_)));
    }
}
