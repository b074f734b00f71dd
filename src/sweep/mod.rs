//! Benchmark sweep
//!
//! Runs the local search for every query of a snapshot and collects a
//! report. Searches are independent: each gets its own explorer, and a
//! failure in one query never aborts the others.

mod report;
mod runner;

pub use report::{QueryFailure, QueryReport, SweepReport, SweepTotals};
pub use runner::{run_query, run_sweep};
