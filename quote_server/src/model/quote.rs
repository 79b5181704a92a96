//! Quotation data model and the quote builder.
//!
//! A `Quote` is the validated internal form of an upstream `RawRate`. It is
//! only ever built through `Quote::try_from(RawRate)`, which either parses
//! both the bid and the timestamp or fails as a whole with
//! `QuoteError::MalformedData`. A `StoredQuote` is a `Quote` that has been
//! durably written and carries the storage-assigned id.

use chrono::{DateTime, NaiveDateTime, Utc};
use quote_common::QuoteError;
use serde::Serialize;

use crate::model::raw_rate::RawRate;

/// Layout of the upstream `create_date` field.
pub const CREATE_DATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Validated exchange-rate quotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Currency code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Bid price, finite and non-negative.
    pub bid: f64,
    /// Quotation time (UTC, second precision).
    pub quotated_at: DateTime<Utc>,
}

/// A `Quote` persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredQuote {
    /// Identifier assigned by the storage engine. Not part of the JSON payload.
    #[serde(skip)]
    pub id: i64,
    /// The persisted quotation.
    #[serde(flatten)]
    pub quote: Quote,
}

impl TryFrom<RawRate> for Quote {
    type Error = QuoteError;

    fn try_from(raw: RawRate) -> Result<Self, Self::Error> {
        let bid = parse_bid(&raw.bid)?;
        let quotated_at = NaiveDateTime::parse_from_str(&raw.create_date, CREATE_DATE_LAYOUT)
            .map_err(|e| {
                QuoteError::MalformedData(format!(
                    "invalid create_date {:?}: {}",
                    raw.create_date, e
                ))
            })?
            .and_utc();

        Ok(Quote {
            code: raw.code,
            name: raw.name,
            bid,
            quotated_at,
        })
    }
}

fn parse_bid(text: &str) -> Result<f64, QuoteError> {
    let bid: f64 = text
        .parse()
        .map_err(|e| QuoteError::MalformedData(format!("invalid bid {:?}: {}", text, e)))?;
    if !bid.is_finite() || bid < 0.0 {
        return Err(QuoteError::MalformedData(format!(
            "bid out of range: {:?}",
            text
        )));
    }
    Ok(bid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(bid: &str, create_date: &str) -> RawRate {
        RawRate {
            code: "USD".to_string(),
            name: "Dólar".to_string(),
            bid: bid.to_string(),
            create_date: create_date.to_string(),
        }
    }

    #[test]
    fn builds_quote_from_valid_raw_rate() {
        let quote = Quote::try_from(raw("5.4321", "2024-01-01 12:00:00")).unwrap();
        assert_eq!(quote.code, "USD");
        assert_eq!(quote.name, "Dólar");
        assert_eq!(quote.bid, 5.4321);
        assert_eq!(
            quote.quotated_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn keeps_full_bid_precision() {
        let quote = Quote::try_from(raw("5.123456789012", "2024-06-30 23:59:59")).unwrap();
        assert_eq!(quote.bid, "5.123456789012".parse::<f64>().unwrap());
        assert_eq!(quote.quotated_at.to_rfc3339(), "2024-06-30T23:59:59+00:00");
    }

    #[test]
    fn zero_bid_is_valid() {
        let quote = Quote::try_from(raw("0", "2024-01-01 00:00:00")).unwrap();
        assert_eq!(quote.bid, 0.0);
    }

    #[test]
    fn rejects_non_numeric_bid() {
        let err = Quote::try_from(raw("abc", "2024-01-01 12:00:00")).unwrap_err();
        assert!(matches!(err, QuoteError::MalformedData(_)));
    }

    #[test]
    fn rejects_negative_and_non_finite_bids() {
        for bid in ["-1.5", "inf", "NaN", ""] {
            let err = Quote::try_from(raw(bid, "2024-01-01 12:00:00")).unwrap_err();
            assert!(matches!(err, QuoteError::MalformedData(_)), "bid {bid:?}");
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in [
            "2024-01-01T12:00:00",
            "01/01/2024 12:00:00",
            "2024-13-01 12:00:00",
            "2024-01-01",
            "",
        ] {
            let err = Quote::try_from(raw("5.0", date)).unwrap_err();
            assert!(matches!(err, QuoteError::MalformedData(_)), "date {date:?}");
        }
    }

    #[test]
    fn stored_quote_serializes_without_id() {
        let stored = StoredQuote {
            id: 42,
            quote: Quote::try_from(raw("5.4321", "2024-01-01 12:00:00")).unwrap(),
        };
        let json = serde_json::to_string(&stored).unwrap();
        assert_eq!(
            json,
            r#"{"code":"USD","name":"Dólar","bid":5.4321,"quotated_at":"2024-01-01T12:00:00Z"}"#
        );
    }
}
