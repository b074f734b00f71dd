//! Search counters
//!
//! - Counters only, monotonic
//! - Atomic, so one registry can be shared by concurrent searches
//! - Updated from finished outcomes; the search itself never touches them

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::search::SearchOutcome;

#[derive(Debug, Default)]
pub struct SearchMetrics {
    searches_completed: AtomicU64,
    searches_failed: AtomicU64,
    rounds: AtomicU64,
    candidates_evaluated: AtomicU64,
    improvements_accepted: AtomicU64,
    searches_improved: AtomicU64,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a finished search into the counters
    pub fn record_outcome(&self, outcome: &SearchOutcome) {
        self.searches_completed.fetch_add(1, Ordering::Relaxed);
        self.rounds.fetch_add(outcome.rounds, Ordering::Relaxed);
        self.candidates_evaluated
            .fetch_add(outcome.tried_count as u64, Ordering::Relaxed);
        let accepted = outcome.history.iter().filter(|r| r.accepted).count() as u64;
        self.improvements_accepted
            .fetch_add(accepted, Ordering::Relaxed);
        if outcome.improved() {
            self.searches_improved.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_failures(&self) {
        self.searches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches_completed: self.searches_completed.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
            rounds: self.rounds.load(Ordering::Relaxed),
            candidates_evaluated: self.candidates_evaluated.load(Ordering::Relaxed),
            improvements_accepted: self.improvements_accepted.load(Ordering::Relaxed),
            searches_improved: self.searches_improved.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub searches_completed: u64,
    pub searches_failed: u64,
    pub rounds: u64,
    pub candidates_evaluated: u64,
    pub improvements_accepted: u64,
    pub searches_improved: u64,
}
