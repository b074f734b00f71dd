//! Local search driver
//!
//! One `QueryExplorer` owns the whole search state for one query:
//! - tried_states: every configuration handed to the simulator
//! - explored_states: best candidates that finished within their timeout
//! - simulated planning and e2e wall-clock totals
//!
//! # Round structure
//!
//! 1. timeout = record_time / relative_boost_threshold
//! 2. candidates = neighbors(record_state) - tried_states
//! 3. simulate the batch, get its best candidate
//! 4. accept it iff record_time / best_time > relative_boost_threshold
//!
//! The loop stops when the iteration budget is spent, when no untried
//! neighbor remains, or when the previous round did not move the record.
//! Each round tries at least one new configuration, so the loop ends within
//! |domain| rounds even without a budget.

use std::collections::HashSet;

use serde::Serialize;

use crate::observability::{Event, Logger};
use crate::oracle::{ExplainPlan, Time, TimingOracle};

use super::errors::{SearchError, SearchResult};
use super::neighbors::neighbors;
use super::settings::SearchSettings;
use super::simulator::{simulate_batch, CandidateTiming};
use super::state::SearchingState;

/// Oracle microseconds to search milliseconds
const US_PER_MS: f64 = 1000.0;

/// Why a search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// max_iter rounds were run
    BudgetExhausted,
    /// Every neighbor of the record had been tried already
    NeighborhoodExhausted,
    /// The last round did not change the record
    FixedPoint,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::BudgetExhausted => "budget_exhausted",
            TerminationReason::NeighborhoodExhausted => "neighborhood_exhausted",
            TerminationReason::FixedPoint => "fixed_point",
        }
    }
}

/// One simulated round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub iteration: u64,
    pub candidates: usize,
    pub timeout: Time,
    pub best_state: SearchingState,
    pub best_time: Time,
    pub accepted: bool,
    /// Record time after the round
    pub record_time: Time,
}

/// Result of a finished search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query_name: String,
    pub default_state: SearchingState,
    pub best_state: SearchingState,
    /// e2e time of `best_state` as observed by the search; infinite when no
    /// candidate was ever accepted
    pub record_time: Time,
    pub rounds: u64,
    pub termination: TerminationReason,
    pub parallel_planning_time: Time,
    pub parallel_e2e_time: Time,
    pub tried_count: usize,
    pub explored_count: usize,
    pub history: Vec<RoundRecord>,
}

impl SearchOutcome {
    /// Whether the search left the default configuration
    pub fn improved(&self) -> bool {
        self.best_state != self.default_state
    }
}

/// Hill-climbing search over hint and dop configurations of one query
pub struct QueryExplorer<'a, O: TimingOracle + ?Sized> {
    oracle: &'a O,
    query_name: String,
    settings: SearchSettings,
    tried_states: HashSet<SearchingState>,
    explored_states: HashSet<SearchingState>,
    parallel_planning_time: Time,
    parallel_e2e_time: Time,
    terminated: bool,
}

impl<'a, O: TimingOracle + ?Sized> QueryExplorer<'a, O> {
    pub fn new(oracle: &'a O, query_name: impl Into<String>, settings: SearchSettings) -> Self {
        Self {
            oracle,
            query_name: query_name.into(),
            settings,
            tried_states: HashSet::new(),
            explored_states: HashSet::new(),
            parallel_planning_time: 0.0,
            parallel_e2e_time: 0.0,
            terminated: false,
        }
    }

    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn tried_states(&self) -> &HashSet<SearchingState> {
        &self.tried_states
    }

    pub fn explored_states(&self) -> &HashSet<SearchingState> {
        &self.explored_states
    }

    /// Simulated planning wall-clock so far, in ms
    pub fn parallel_planning_time(&self) -> Time {
        self.parallel_planning_time
    }

    /// Simulated e2e wall-clock so far, in ms
    pub fn parallel_e2e_time(&self) -> Time {
        self.parallel_e2e_time
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Execution time in ms
    pub fn execution_time(&self, state: &SearchingState) -> SearchResult<Time> {
        let us = self
            .oracle
            .execution_time(&state.request(&self.query_name))?;
        Ok(us / US_PER_MS)
    }

    /// Planning time in ms
    pub fn planning_time(&self, state: &SearchingState) -> SearchResult<Time> {
        let us = self.oracle.planning_time(&state.request(&self.query_name))?;
        Ok(us / US_PER_MS)
    }

    /// Planning plus execution time in ms
    pub fn e2e_time(&self, state: &SearchingState) -> SearchResult<Time> {
        Ok(self.execution_time(state)? + self.planning_time(state)?)
    }

    pub fn explain_plan(&self, state: &SearchingState) -> SearchResult<&'a ExplainPlan> {
        Ok(self.oracle.explain_plan(&state.request(&self.query_name))?)
    }

    /// Simulates launching `batch` at once and updates the running totals.
    ///
    /// Returns the best e2e time with its state. The best state is recorded
    /// as explored only if it finished within `timeout`.
    pub fn explore_in_parallel(
        &mut self,
        batch: &[SearchingState],
        timeout: Time,
    ) -> SearchResult<(Time, SearchingState)> {
        if batch.is_empty() {
            return Err(SearchError::empty_batch());
        }

        self.tried_states.extend(batch.iter().copied());

        let mut timings = Vec::with_capacity(batch.len());
        for state in batch {
            let planning_time = self.planning_time(state)?;
            let e2e_time = self.execution_time(state)? + planning_time;
            timings.push(CandidateTiming {
                state: *state,
                planning_time,
                e2e_time,
            });
        }

        let outcome = simulate_batch(&timings, timeout)?;

        self.parallel_planning_time += outcome.planning_contribution;
        self.parallel_e2e_time += outcome.e2e_contribution;
        if outcome.within_timeout {
            self.explored_states.insert(outcome.best_state);
        }

        Ok((outcome.best_time, outcome.best_state))
    }

    /// Runs the search to completion. A second call is rejected.
    pub fn run(&mut self) -> SearchResult<SearchOutcome> {
        if self.terminated {
            return Err(SearchError::already_run(&self.query_name));
        }
        self.terminated = true;

        let threshold = self.settings.relative_boost_threshold();
        let default_state = self.settings.default_state();

        let mut record_state = default_state;
        let mut record_time = f64::INFINITY;
        let mut prev_state: Option<SearchingState> = None;
        let mut iteration: u64 = 0;
        let mut history = Vec::new();

        Logger::trace(
            Event::SearchStart.as_str(),
            &[
                ("query", self.query_name.as_str()),
                ("default_state", default_state.to_string().as_str()),
            ],
        );

        let termination = loop {
            if !self.settings.within_budget(iteration) {
                break TerminationReason::BudgetExhausted;
            }
            if prev_state == Some(record_state) {
                break TerminationReason::FixedPoint;
            }

            let timeout = record_time / threshold;
            prev_state = Some(record_state);

            let candidates: Vec<_> = neighbors(&record_state, &self.settings)
                .into_iter()
                .filter(|state| !self.tried_states.contains(state))
                .collect();
            if candidates.is_empty() {
                break TerminationReason::NeighborhoodExhausted;
            }

            let (best_time, best_state) = self.explore_in_parallel(&candidates, timeout)?;

            let accepted = record_time / best_time > threshold;
            if accepted {
                record_state = best_state;
                record_time = best_time;
            }

            Logger::trace(
                Event::SearchRound.as_str(),
                &[
                    ("query", self.query_name.as_str()),
                    ("iteration", iteration.to_string().as_str()),
                    ("candidates", candidates.len().to_string().as_str()),
                    ("best_state", best_state.to_string().as_str()),
                    ("best_time_ms", best_time.to_string().as_str()),
                    ("accepted", if accepted { "true" } else { "false" }),
                ],
            );

            history.push(RoundRecord {
                iteration,
                candidates: candidates.len(),
                timeout,
                best_state,
                best_time,
                accepted,
                record_time,
            });

            iteration += 1;
        };

        Logger::trace(
            Event::SearchComplete.as_str(),
            &[
                ("query", self.query_name.as_str()),
                ("best_state", record_state.to_string().as_str()),
                ("rounds", iteration.to_string().as_str()),
                ("termination", termination.as_str()),
            ],
        );

        Ok(SearchOutcome {
            query_name: self.query_name.clone(),
            default_state,
            best_state: record_state,
            record_time,
            rounds: iteration,
            termination,
            parallel_planning_time: self.parallel_planning_time,
            parallel_e2e_time: self.parallel_e2e_time,
            tried_count: self.tried_states.len(),
            explored_count: self.explored_states.len(),
            history,
        })
    }
}
