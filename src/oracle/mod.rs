//! Timing oracle over a pre-tabulated benchmark
//!
//! The oracle answers, for a (query, hintset, dop) triple, how long planning
//! and execution took when the benchmark was recorded, and which plan the
//! optimizer produced. No query is ever executed.
//!
//! # Guarantees
//!
//! - Read-only after load
//! - Deterministic: the same request always yields the same answer
//! - A missing triple is a fatal error, never a default value

mod benchmark;
mod errors;
mod plan;
mod types;

pub use benchmark::{BenchmarkOracle, BenchmarkOracleBuilder, TimingOracle};
pub use errors::{OracleError, OracleErrorCode, OracleResult, Severity};
pub use plan::{ExplainAnalyzeNode, ExplainAnalyzePlan, ExplainNode, ExplainPlan, Plans};
pub use types::{
    settings_key, Cardinality, Cost, HintsetCode, OracleRequest, QueryDop, QueryName,
    Selectivity, SettingsKeyParser, Time, TIMEOUT,
};
