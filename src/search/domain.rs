//! Configuration domain of the benchmark
//!
//! Hintset bit layout (a set bit disables the operator):
//!
//! | bit | operator        |
//! |-----|-----------------|
//! | 0   | bitmap scan     |
//! | 1   | index scan      |
//! | 2   | seq scan        |
//! | 3   | index-only scan |
//! | 4   | hash join       |
//! | 5   | merge join      |
//! | 6   | nested loop     |

use crate::oracle::{HintsetCode, QueryDop};

/// Planner switches, in bit order
pub const HINTS: [&str; 7] = [
    "enable_bitmapscan",
    "enable_indexscan",
    "enable_seqscan",
    "enable_indexonlyscan",
    "enable_hashjoin",
    "enable_mergejoin",
    "enable_nestloop",
];

/// Scan operators occupy the low bits
pub const N_SCANS: u32 = 4;

/// Join operators follow the scans
pub const N_JOINS: u32 = 3;

/// Position of nested loop among the join bits
pub const NL_POS: u32 = 2;

/// Disables index nested loop joins: nested loop, index-only scan, index scan
pub const OFF_INL_HINT: HintsetCode = 64 | 8 | 2;

/// Recorded degrees of parallelism, ascending
pub const DOPS: [QueryDop; 3] = [1, 16, 64];

pub const DEFAULT_DOP: QueryDop = 64;

/// Everything enabled
pub const DEFAULT_HINTSET: HintsetCode = 0;

/// Number of distinct hintsets
pub const HINTSET_COUNT: HintsetCode = 1 << (N_SCANS + N_JOINS);

/// All hintsets of the domain, ascending
pub fn all_hintsets() -> Vec<HintsetCode> {
    (0..HINTSET_COUNT).collect()
}

/// Whether a hintset only uses declared hint bits
pub fn is_valid_hintset(hintset: HintsetCode) -> bool {
    hintset < HINTSET_COUNT
}

pub fn is_valid_dop(dop: QueryDop) -> bool {
    DOPS.contains(&dop)
}

/// Names of the operators a hintset disables
pub fn disabled_hints(hintset: HintsetCode) -> Vec<&'static str> {
    HINTS
        .iter()
        .enumerate()
        .filter(|(bit, _)| hintset & (1 << bit) != 0)
        .map(|(_, name)| *name)
        .collect()
}
