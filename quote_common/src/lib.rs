//!
//! Common types and utilities shared by the quotation server and client.
//!
//! This crate aggregates:
//! - `error` — the pipeline failure taxonomy `QuoteError`.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `stage` — names of the deadline-bounded pipeline stages.
//! - `deadline` — cascading deadlines that cancel the stage they bound.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod result;
pub mod stage;

pub use deadline::Deadline;
pub use error::QuoteError;
pub use result::Result;
pub use stage::Stage;
