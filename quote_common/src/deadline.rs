//! Cascading deadlines for the quotation pipeline.
//!
//! A `Deadline` is a point in time after which the work it bounds must stop.
//! Child deadlines are derived from a parent with [`Deadline::child`] and
//! always resolve to the tighter of the two bounds, so a stage budget can
//! shorten but never extend the time the caller has left.
//!
//! [`Deadline::run`] drives a stage future under the deadline. When the
//! deadline fires the future is dropped, which abandons whatever socket read
//! or database statement it was waiting on, and the stage reports
//! `QuoteError::Timeout` instead of a generic I/O failure.
//!
//! Time is read from `tokio::time::Instant`, so tests can pause and advance
//! the clock deterministically.
use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};

use crate::error::QuoteError;
use crate::result::Result;
use crate::stage::Stage;

/// Upper bound used when a budget is too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// An absolute point in time bounding a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline that fires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: offset_from_now(budget),
        }
    }

    /// Derive a deadline for a nested stage.
    ///
    /// The child fires at `min(self, now + budget)`: if the stage budget is
    /// longer than what remains on `self`, the parent still governs.
    pub fn child(&self, budget: Duration) -> Self {
        Self {
            at: self.at.min(offset_from_now(budget)),
        }
    }

    /// Time left before the deadline fires, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has already fired.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Run `work` as `stage` under this deadline.
    ///
    /// Errors produced by `work` are returned unchanged. If the deadline fires
    /// first, `work` is dropped mid-flight and `QuoteError::Timeout(stage)` is
    /// returned. An already expired deadline never polls `work`.
    pub async fn run<T, F>(&self, stage: Stage, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_expired() {
            return Err(QuoteError::Timeout(stage));
        }
        match timeout_at(self.at, work).await {
            Ok(outcome) => outcome,
            Err(_) => Err(QuoteError::Timeout(stage)),
        }
    }
}

fn offset_from_now(budget: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(budget).unwrap_or(now + FAR_FUTURE)
}
