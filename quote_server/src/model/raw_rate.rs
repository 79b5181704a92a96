//! Upstream exchange-rate payload, as received from the rate API.
//!
//! Nothing here is validated: bid and timestamp are still text. The quote
//! builder in `model::quote` turns a `RawRate` into a checked `Quote`.
use serde::Deserialize;

/// A currency quote exactly as the upstream API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRate {
    /// Source currency code (e.g. `USD`).
    pub code: String,
    /// Display name of the pair.
    pub name: String,
    /// Bid price as decimal text.
    pub bid: String,
    /// Quotation time as `YYYY-MM-DD HH:MM:SS` text.
    pub create_date: String,
}

/// Envelope returned by the USD-BRL endpoint. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RatePayload {
    /// The USD→BRL quote.
    #[serde(rename = "USDBRL")]
    pub usd_brl: RawRate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_envelope_ignoring_extra_fields() {
        let body = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro",
            "high":"5.5","low":"5.4","bid":"5.4321","ask":"5.4330",
            "timestamp":"1704110400","create_date":"2024-01-01 12:00:00"}}"#;
        let payload: RatePayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.usd_brl.code, "USD");
        assert_eq!(payload.usd_brl.bid, "5.4321");
        assert_eq!(payload.usd_brl.create_date, "2024-01-01 12:00:00");
    }

    #[test]
    fn rejects_envelope_without_pair_key() {
        let result: Result<RatePayload, _> =
            serde_json::from_str(r#"{"EURBRL":{"code":"EUR","name":"Euro","bid":"6","create_date":"x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_numeric_bid() {
        let result: Result<RatePayload, _> = serde_json::from_str(
            r#"{"USDBRL":{"code":"USD","name":"Dólar","bid":5.4,"create_date":"2024-01-01 12:00:00"}}"#,
        );
        assert!(result.is_err());
    }
}
