//! Data model types exchanged with the quotation server.
//!
//! - `quote` — the bid decoded from the server's quotation payload.
pub mod quote;
