//! Sweep runner
//!
//! Runs one fresh explorer per query, in `query_names()` order. Explorers
//! share only the read-only oracle. A failing query is logged and recorded;
//! the sweep goes on with the next one.

use chrono::Utc;
use uuid::Uuid;

use crate::observability::{log_event, Event, SearchMetrics};
use crate::oracle::TimingOracle;
use crate::search::{QueryExplorer, SearchOutcome, SearchResult, SearchSettings};

use super::report::{QueryFailure, QueryReport, SweepReport, SweepTotals};

/// Searches one query and re-queries the timings of the result
pub fn run_query<O: TimingOracle + ?Sized>(
    oracle: &O,
    query_name: &str,
    settings: &SearchSettings,
) -> SearchResult<QueryReport> {
    search(oracle, query_name, settings).map(|(_, report)| report)
}

fn search<O: TimingOracle + ?Sized>(
    oracle: &O,
    query_name: &str,
    settings: &SearchSettings,
) -> SearchResult<(SearchOutcome, QueryReport)> {
    let mut explorer = QueryExplorer::new(oracle, query_name, settings.clone());
    let outcome = explorer.run()?;

    let default_time = explorer.e2e_time(&outcome.default_state)?;
    let best_time = explorer.e2e_time(&outcome.best_state)?;

    let report = QueryReport {
        query_name: query_name.to_string(),
        default_state: outcome.default_state,
        best_state: outcome.best_state,
        default_time,
        best_time,
        boost: default_time / best_time,
        parallel_planning_time: outcome.parallel_planning_time,
        parallel_e2e_time: outcome.parallel_e2e_time,
        rounds: outcome.rounds,
        termination: outcome.termination,
    };
    Ok((outcome, report))
}

/// Searches every query of the oracle
pub fn run_sweep<O: TimingOracle + ?Sized>(
    oracle: &O,
    settings: &SearchSettings,
    metrics: &SearchMetrics,
) -> SweepReport {
    let query_names = oracle.query_names();
    let count = query_names.len().to_string();
    log_event(Event::SweepStart, &[("queries", count.as_str())]);

    let mut queries = Vec::with_capacity(query_names.len());
    let mut failures = Vec::new();

    for query_name in &query_names {
        match search(oracle, query_name, settings) {
            Ok((outcome, report)) => {
                metrics.record_outcome(&outcome);
                queries.push(report);
            }
            Err(err) => {
                metrics.increment_failures();
                log_event(
                    Event::SweepQueryFailed,
                    &[
                        ("query", query_name.as_str()),
                        ("code", err.code().code()),
                        ("reason", err.message()),
                    ],
                );
                failures.push(QueryFailure {
                    query_name: query_name.clone(),
                    code: err.code().code().to_string(),
                    message: err.message().to_string(),
                });
            }
        }
    }

    let totals = SweepTotals::from_reports(&queries);
    let succeeded = queries.len().to_string();
    let failed = failures.len().to_string();
    log_event(
        Event::SweepComplete,
        &[("succeeded", succeeded.as_str()), ("failed", failed.as_str())],
    );

    SweepReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        settings: settings.clone(),
        queries,
        failures,
        totals,
        metrics: metrics.snapshot(),
    }
}
