//! Local search over planner hints and degree of parallelism
//!
//! For one query, hill-climbs from the default configuration towards
//! configurations with lower end-to-end time, using the oracle's recorded
//! timings instead of running anything.
//!
//! # Design Principles
//!
//! - Deterministic: same oracle, query and settings give the same result
//! - Memoized: a configuration is simulated at most once per search
//! - Thresholded: a new record needs a strict relative improvement
//! - Owned: all mutable search state lives in one `QueryExplorer`
//!
//! # Tie-breaking
//!
//! Neighborhoods are sorted by (hintset, dop). Among equally fast
//! candidates the first one in that order wins.

pub mod domain;
mod errors;
mod explorer;
mod neighbors;
mod presets;
mod settings;
mod simulator;
mod state;

pub use errors::{SearchError, SearchErrorCode, SearchResult, Severity};
pub use explorer::{QueryExplorer, RoundRecord, SearchOutcome, TerminationReason};
pub use neighbors::neighbors;
pub use presets::{preset, PRESET_NAMES};
pub use settings::{SearchSettings, SearchSettingsBuilder, SettingsError, SettingsResult};
pub use simulator::{simulate_batch, BatchOutcome, CandidateTiming};
pub use state::SearchingState;
