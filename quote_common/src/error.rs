//! Error types shared between client and server.
//!
//! The `QuoteError` enum is the failure taxonomy of the quotation pipeline.
//! Every stage surfaces one of these kinds unmodified, so the request handler
//! (and the client) can tell a deadline that fired apart from a transport
//! fault, bad upstream data, or a storage problem.
use std::io;

use thiserror::Error;

use crate::stage::Stage;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The ambient deadline or the stage budget fired while `Stage` was active.
    #[error("Timeout during {0} stage")]
    Timeout(Stage),

    /// Network or connection level fault while talking to a remote HTTP peer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A payload could not be decoded, or decoded into values that fail validation.
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Schema or write failure reported by the storage engine.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error originating from the standard library, sockets or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid command line or startup configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    /// Returns `true` if this error was caused by a deadline firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_timeout_reports_as_timeout() {
        assert!(QuoteError::Timeout(Stage::Fetch).is_timeout());
        assert!(!QuoteError::Transport("refused".into()).is_timeout());
        assert!(!QuoteError::MalformedData("abc".into()).is_timeout());
        assert!(!QuoteError::Storage("locked".into()).is_timeout());
    }

    #[test]
    fn timeout_message_names_the_stage() {
        let err = QuoteError::Timeout(Stage::Persist);
        assert_eq!(err.to_string(), "Timeout during persist stage");
    }
}
