//! Scalar types shared by the oracle and the search
//!
//! Timings inside the oracle are microseconds, as recorded by the benchmark.
//! The search layer converts them to milliseconds.

use std::fmt;

use regex::Regex;

/// Query identifier (file stem of the benchmark snapshot entry)
pub type QueryName = String;

/// Bitmask of disabled planner operators
pub type HintsetCode = u32;

/// Degree of parallelism
pub type QueryDop = u32;

/// Time value (microseconds in the oracle, milliseconds in the search)
pub type Time = f64;

/// Planner-estimated cost
pub type Cost = f64;

/// Estimated or actual row count
pub type Cardinality = f64;

/// Selectivity of a plan node relative to its inputs
pub type Selectivity = f64;

/// Execution time recorded for a run that exceeded the benchmark limit
pub const TIMEOUT: Time = f64::INFINITY;

/// A keyed oracle lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OracleRequest<'a> {
    pub query_name: &'a str,
    pub hintset: HintsetCode,
    pub dop: QueryDop,
}

impl<'a> OracleRequest<'a> {
    pub fn new(query_name: &'a str, hintset: HintsetCode, dop: QueryDop) -> Self {
        Self {
            query_name,
            hintset,
            dop,
        }
    }
}

impl fmt::Display for OracleRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "query={} hintset={} dop={}",
            self.query_name, self.hintset, self.dop
        )
    }
}

/// Formats a snapshot settings key, `"(dop, hintset)"`
pub fn settings_key(dop: QueryDop, hintset: HintsetCode) -> String {
    format!("({}, {})", dop, hintset)
}

/// Parser for snapshot settings keys
pub struct SettingsKeyParser {
    pattern: Regex,
}

impl SettingsKeyParser {
    pub fn new() -> Self {
        Self {
            // Literal pattern, always valid
            pattern: Regex::new(r"^\(\s*(\d+)\s*,\s*(\d+)\s*\)$").unwrap(),
        }
    }

    /// Parses `"(dop, hintset)"` into `(dop, hintset)`
    pub fn parse(&self, key: &str) -> Option<(QueryDop, HintsetCode)> {
        let caps = self.pattern.captures(key.trim())?;
        let dop = caps.get(1)?.as_str().parse().ok()?;
        let hintset = caps.get(2)?.as_str().parse().ok()?;
        Some((dop, hintset))
    }
}

impl Default for SettingsKeyParser {
    fn default() -> Self {
        Self::new()
    }
}
