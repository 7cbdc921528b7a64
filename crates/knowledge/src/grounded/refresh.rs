//! Periodic index rebuilds for long-running sessions.

use crate::grounded::responder::GroundedResponder;
use crate::source::RowSource;
use grounded_core::AppResult;
use std::time::{Duration, Instant};

/// Rebuilds a responder's index once the refresh interval has passed.
///
/// A failed attempt also restarts the interval, so an unreachable store is
/// retried at the configured pace rather than on every question.
#[derive(Debug, Clone)]
pub struct IndexRefresher {
    interval: Option<Duration>,
    last_attempt: Instant,
}

impl IndexRefresher {
    /// `interval` of `None` never refreshes. `now` marks when the current
    /// index was built.
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval,
            last_attempt: now,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.interval {
            Some(interval) => now.saturating_duration_since(self.last_attempt) >= interval,
            None => false,
        }
    }

    /// Rebuild from the source returned by `open` when a refresh is due.
    ///
    /// Returns true when a new index was put in service. Failures are
    /// logged and the previous index keeps answering.
    pub fn refresh_if_due<S, F>(&mut self, responder: &GroundedResponder, now: Instant, open: F) -> bool
    where
        S: RowSource,
        F: FnOnce() -> AppResult<S>,
    {
        if !self.is_due(now) {
            return false;
        }
        self.last_attempt = now;

        tracing::debug!("Refreshing knowledge index");
        let source = match open() {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Cannot open row source for refresh, keeping previous index: {}", e);
                return false;
            }
        };

        responder.rebuild(&source).is_ok()
    }
}
