//! Quotation payload received from the server.
//!
//! The server answers with the full stored quotation; the client only needs
//! the bid, so every other field is ignored while decoding.
use serde::Deserialize;

/// The part of the server's quotation the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct QuoteBid {
    /// Bid price.
    pub bid: f64,
}
