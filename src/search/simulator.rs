//! Parallel cost simulation
//!
//! Estimates what launching a whole batch of candidates at once would have
//! cost in wall-clock time. Planning runs side by side, so the batch pays for
//! the slowest planner. Execution stops at the first finished candidate, so
//! the batch pays for the fastest end-to-end run. Both are capped at the
//! effective timeout, which never exceeds the best candidate's e2e time.
//!
//! This is arithmetic over recorded timings; nothing runs concurrently.

use serde::Serialize;

use crate::oracle::Time;

use super::errors::{SearchError, SearchResult};
use super::state::SearchingState;

/// Timings of one candidate, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateTiming {
    pub state: SearchingState,
    pub planning_time: Time,
    pub e2e_time: Time,
}

/// Result of simulating one batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Fastest candidate; first in batch order on ties
    pub best_state: SearchingState,
    pub best_time: Time,
    /// min(caller timeout, best_time)
    pub effective_timeout: Time,
    /// Simulated planning wall-clock of the batch
    pub planning_contribution: Time,
    /// Simulated e2e wall-clock of the batch
    pub e2e_contribution: Time,
    /// Whether the best candidate finished within the caller timeout
    pub within_timeout: bool,
}

/// Simulates a batch against a caller timeout.
///
/// Candidates whose planning alone exceeds the timeout still count towards
/// the planning maximum, capped at the timeout.
pub fn simulate_batch(batch: &[CandidateTiming], timeout: Time) -> SearchResult<BatchOutcome> {
    let first = batch.first().ok_or_else(SearchError::empty_batch)?;

    let mut best = first;
    for candidate in &batch[1..] {
        if candidate.e2e_time < best.e2e_time {
            best = candidate;
        }
    }

    let effective_timeout = timeout.min(best.e2e_time);

    let planning_contribution = batch
        .iter()
        .map(|c| c.planning_time.min(effective_timeout))
        .fold(f64::NEG_INFINITY, f64::max);

    let e2e_contribution = batch
        .iter()
        .map(|c| c.e2e_time.min(effective_timeout))
        .fold(f64::INFINITY, f64::min);

    Ok(BatchOutcome {
        best_state: best.state,
        best_time: best.e2e_time,
        effective_timeout,
        planning_contribution,
        e2e_contribution,
        within_timeout: best.e2e_time <= timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::errors::SearchErrorCode;

    fn candidate(hintset: u32, planning_time: f64, e2e_time: f64) -> CandidateTiming {
        CandidateTiming {
            state: SearchingState::new(hintset, 64),
            planning_time,
            e2e_time,
        }
    }

    #[test]
    fn test_two_candidates_under_timeout() {
        let batch = [candidate(0, 2.0, 10.0), candidate(1, 5.0, 30.0)];
        let out = simulate_batch(&batch, 20.0).unwrap();

        assert_eq!(out.best_state, SearchingState::new(0, 64));
        assert_eq!(out.best_time, 10.0);
        assert_eq!(out.effective_timeout, 10.0);
        assert!(out.within_timeout);
        assert_eq!(out.e2e_contribution, 10.0);
        assert_eq!(out.planning_contribution, 5.0);
    }

    #[test]
    fn test_best_over_timeout_not_within() {
        let batch = [candidate(0, 1.0, 50.0), candidate(1, 1.0, 40.0)];
        let out = simulate_batch(&batch, 20.0).unwrap();

        assert_eq!(out.best_time, 40.0);
        assert_eq!(out.effective_timeout, 20.0);
        assert!(!out.within_timeout);
        assert_eq!(out.e2e_contribution, 20.0);
    }

    #[test]
    fn test_slow_planner_capped_but_counted() {
        // Planning of the second candidate alone exceeds the timeout
        let batch = [candidate(0, 1.0, 8.0), candidate(1, 100.0, 150.0)];
        let out = simulate_batch(&batch, 30.0).unwrap();

        assert_eq!(out.effective_timeout, 8.0);
        assert_eq!(out.planning_contribution, 8.0);
        assert_eq!(out.e2e_contribution, 8.0);
    }

    #[test]
    fn test_ties_first_wins() {
        let batch = [
            candidate(4, 1.0, 12.0),
            candidate(2, 1.0, 12.0),
            candidate(8, 1.0, 13.0),
        ];
        let out = simulate_batch(&batch, f64::INFINITY).unwrap();
        assert_eq!(out.best_state.hintset, 4);
    }

    #[test]
    fn test_infinite_timeout() {
        let batch = [candidate(0, 3.0, 9.0), candidate(1, 4.0, 7.0)];
        let out = simulate_batch(&batch, f64::INFINITY).unwrap();

        assert_eq!(out.effective_timeout, 7.0);
        assert_eq!(out.planning_contribution, 4.0);
        assert_eq!(out.e2e_contribution, 7.0);
        assert!(out.within_timeout);
    }

    #[test]
    fn test_timed_out_candidates() {
        let batch = [candidate(0, 3.0, f64::INFINITY), candidate(1, 2.0, f64::INFINITY)];
        let out = simulate_batch(&batch, f64::INFINITY).unwrap();

        assert_eq!(out.best_state.hintset, 0);
        assert_eq!(out.best_time, f64::INFINITY);
        assert_eq!(out.planning_contribution, 3.0);
        assert!(out.within_timeout);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = simulate_batch(&[], 10.0).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::HboSearchEmptyBatch);
    }
}
