//! Domain models for the quotation server.
//!
//! - `raw_rate` — the upstream payload, still as text.
//! - `quote` — validated `Quote`, persisted `StoredQuote` and the builder
//!   converting a `RawRate` into a `Quote`.

pub mod quote;
pub mod raw_rate;

pub use quote::{Quote, StoredQuote};
pub use raw_rate::{RatePayload, RawRate};
