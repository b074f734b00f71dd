//! Sweep report types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::observability::MetricsSnapshot;
use crate::oracle::Time;
use crate::search::{SearchSettings, SearchingState, TerminationReason};

/// Result of one query's search, with times re-queried from the oracle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub query_name: String,
    pub default_state: SearchingState,
    pub best_state: SearchingState,
    /// e2e time of the default configuration, ms
    pub default_time: Time,
    /// e2e time of the found configuration, ms
    pub best_time: Time,
    /// default_time / best_time
    pub boost: f64,
    pub parallel_planning_time: Time,
    pub parallel_e2e_time: Time,
    pub rounds: u64,
    pub termination: TerminationReason,
}

/// A query whose search failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFailure {
    pub query_name: String,
    pub code: String,
    pub message: String,
}

/// Sums over the successful queries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepTotals {
    pub default_time: Time,
    pub best_time: Time,
    pub parallel_planning_time: Time,
    pub parallel_e2e_time: Time,
    /// total default_time / total best_time
    pub boost: f64,
}

impl SweepTotals {
    pub fn from_reports(reports: &[QueryReport]) -> Self {
        let mut totals = SweepTotals::default();
        for report in reports {
            totals.default_time += report.default_time;
            totals.best_time += report.best_time;
            totals.parallel_planning_time += report.parallel_planning_time;
            totals.parallel_e2e_time += report.parallel_e2e_time;
        }
        totals.boost = if totals.best_time > 0.0 {
            totals.default_time / totals.best_time
        } else {
            1.0
        };
        totals
    }
}

/// Full result of a sweep over a benchmark
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub settings: SearchSettings,
    pub queries: Vec<QueryReport>,
    pub failures: Vec<QueryFailure>,
    pub totals: SweepTotals,
    pub metrics: MetricsSnapshot,
}

impl SweepReport {
    pub fn improved_queries(&self) -> usize {
        self.queries
            .iter()
            .filter(|q| q.best_state != q.default_state)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(default_time: f64, best_time: f64) -> QueryReport {
        QueryReport {
            query_name: "q".into(),
            default_state: SearchingState::default(),
            best_state: SearchingState::default(),
            default_time,
            best_time,
            boost: default_time / best_time,
            parallel_planning_time: 1.0,
            parallel_e2e_time: best_time,
            rounds: 1,
            termination: TerminationReason::FixedPoint,
        }
    }

    #[test]
    fn test_totals() {
        let totals = SweepTotals::from_reports(&[report(100.0, 50.0), report(20.0, 10.0)]);
        assert_eq!(totals.default_time, 120.0);
        assert_eq!(totals.best_time, 60.0);
        assert_eq!(totals.parallel_planning_time, 2.0);
        assert_eq!(totals.boost, 2.0);
    }

    #[test]
    fn test_empty_totals() {
        let totals = SweepTotals::from_reports(&[]);
        assert_eq!(totals.boost, 1.0);
        assert_eq!(totals.default_time, 0.0);
    }
}
