//! hbosearch - greedy hint and parallelism search over recorded query timings
//!
//! The search never runs queries. Every timing and plan comes from a
//! [`oracle::TimingOracle`], normally a processed benchmark snapshot.

pub mod cli;
pub mod observability;
pub mod oracle;
pub mod search;
pub mod sweep;
