//! Observable events
//!
//! Events are explicit and typed; the string form is the `event` key of the
//! log line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Search
    /// A query search begins
    SearchStart,
    /// One simulated round finished
    SearchRound,
    /// A query search terminated
    SearchComplete,

    // Sweep
    /// A sweep over all queries begins
    SweepStart,
    /// One query of a sweep failed; the sweep continues
    SweepQueryFailed,
    /// A sweep finished
    SweepComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SearchStart => "SEARCH_START",
            Event::SearchRound => "SEARCH_ROUND",
            Event::SearchComplete => "SEARCH_COMPLETE",
            Event::SweepStart => "SWEEP_START",
            Event::SweepQueryFailed => "SWEEP_QUERY_FAILED",
            Event::SweepComplete => "SWEEP_COMPLETE",
        }
    }

    /// Failure events are logged at ERROR
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::SweepQueryFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
