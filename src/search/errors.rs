//! Search error types
//!
//! Error codes:
//! - HBO_SEARCH_ORACLE (FATAL): oracle lookup failed, carried unchanged
//! - HBO_SEARCH_EMPTY_BATCH (FATAL): simulator called without candidates
//! - HBO_SEARCH_ALREADY_RUN (REJECT): explorer runs are single-shot
//!
//! An exhausted neighborhood is a normal termination, not an error.

use std::fmt;

use crate::oracle::OracleError;

/// Severity levels for search errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, no state changed
    Reject,
    /// Search aborted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Search error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    HboSearchOracle,
    HboSearchEmptyBatch,
    HboSearchAlreadyRun,
}

impl SearchErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SearchErrorCode::HboSearchOracle => "HBO_SEARCH_ORACLE",
            SearchErrorCode::HboSearchEmptyBatch => "HBO_SEARCH_EMPTY_BATCH",
            SearchErrorCode::HboSearchAlreadyRun => "HBO_SEARCH_ALREADY_RUN",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SearchErrorCode::HboSearchAlreadyRun => Severity::Reject,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for SearchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Search error with context
#[derive(Debug, Clone)]
pub struct SearchError {
    code: SearchErrorCode,
    message: String,
    source: Option<OracleError>,
}

impl SearchError {
    pub fn empty_batch() -> Self {
        Self {
            code: SearchErrorCode::HboSearchEmptyBatch,
            message: "Candidate batch must not be empty".into(),
            source: None,
        }
    }

    pub fn already_run(query: &str) -> Self {
        Self {
            code: SearchErrorCode::HboSearchAlreadyRun,
            message: format!("Search for query '{}' has already terminated", query),
            source: None,
        }
    }

    pub fn code(&self) -> SearchErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying oracle error, if the search failed on a lookup
    pub fn oracle_error(&self) -> Option<&OracleError> {
        self.source.as_ref()
    }
}

impl From<OracleError> for SearchError {
    fn from(e: OracleError) -> Self {
        Self {
            code: SearchErrorCode::HboSearchOracle,
            message: e.message().to_string(),
            source: Some(e),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;
