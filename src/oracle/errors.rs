//! Oracle error types
//!
//! Error codes:
//! - HBO_ORACLE_MISSING_ENTRY (FATAL)
//! - HBO_ORACLE_UNKNOWN_QUERY (FATAL)
//! - HBO_ORACLE_LOAD_FAILED (FATAL)
//! - HBO_ORACLE_INVALID_KEY (FATAL)
//!
//! A lookup miss means the configuration domain was set up wrong. It is
//! never retried and never corrected by the caller.

use std::fmt;

/// Severity levels for oracle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current search or load cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Oracle error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleErrorCode {
    /// No record for a (query, hintset, dop) triple
    HboOracleMissingEntry,
    /// Query is not part of the snapshot
    HboOracleUnknownQuery,
    /// Snapshot could not be read or parsed
    HboOracleLoadFailed,
    /// Snapshot settings key is malformed
    HboOracleInvalidKey,
}

impl OracleErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            OracleErrorCode::HboOracleMissingEntry => "HBO_ORACLE_MISSING_ENTRY",
            OracleErrorCode::HboOracleUnknownQuery => "HBO_ORACLE_UNKNOWN_QUERY",
            OracleErrorCode::HboOracleLoadFailed => "HBO_ORACLE_LOAD_FAILED",
            OracleErrorCode::HboOracleInvalidKey => "HBO_ORACLE_INVALID_KEY",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for OracleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Oracle error with context
#[derive(Debug, Clone)]
pub struct OracleError {
    code: OracleErrorCode,
    message: String,
    query: Option<String>,
}

impl OracleError {
    /// No entry for the requested configuration
    pub fn missing_entry(query: &str, hintset: u32, dop: u32) -> Self {
        Self {
            code: OracleErrorCode::HboOracleMissingEntry,
            message: format!(
                "No record for query '{}' with hintset {} and dop {}",
                query, hintset, dop
            ),
            query: Some(query.to_string()),
        }
    }

    /// Query not present in the snapshot
    pub fn unknown_query(query: &str) -> Self {
        Self {
            code: OracleErrorCode::HboOracleUnknownQuery,
            message: format!("Query '{}' not found in benchmark snapshot", query),
            query: Some(query.to_string()),
        }
    }

    /// Snapshot could not be loaded
    pub fn load_failed(reason: impl Into<String>) -> Self {
        Self {
            code: OracleErrorCode::HboOracleLoadFailed,
            message: reason.into(),
            query: None,
        }
    }

    /// Malformed settings key inside a query file
    pub fn invalid_key(query: &str, key: &str) -> Self {
        Self {
            code: OracleErrorCode::HboOracleInvalidKey,
            message: format!("Invalid settings key '{}' for query '{}'", key, query),
            query: Some(query.to_string()),
        }
    }

    pub fn code(&self) -> OracleErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Query the error refers to, if any
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for OracleError {
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

impl std::error::Error for OracleError {}

/// Result type for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
