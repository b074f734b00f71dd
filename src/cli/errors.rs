//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::oracle::OracleError;
use crate::search::{SearchError, SettingsError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or settings error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Benchmark snapshot could not be loaded
    OracleError,
    /// A search failed
    SearchFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HBO_CLI_CONFIG_ERROR",
            Self::IoError => "HBO_CLI_IO_ERROR",
            Self::OracleError => "HBO_CLI_ORACLE_ERROR",
            Self::SearchFailed => "HBO_CLI_SEARCH_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<OracleError> for CliError {
    fn from(e: OracleError) -> Self {
        Self::new(CliErrorCode::OracleError, e.to_string())
    }
}

impl From<SearchError> for CliError {
    fn from(e: SearchError) -> Self {
        Self::new(CliErrorCode::SearchFailed, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_is_config_error() {
        let err: CliError = SettingsError::ZeroMaxIter.into();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert_eq!(err.code_str(), "HBO_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_oracle_error_keeps_code_in_message() {
        let err: CliError = OracleError::unknown_query("q42").into();
        assert_eq!(err.code(), &CliErrorCode::OracleError);
        assert!(err.message().contains("HBO_ORACLE_UNKNOWN_QUERY"));
    }

    #[test]
    fn test_display() {
        let err = CliError::io_error("disk full");
        assert_eq!(err.to_string(), "HBO_CLI_IO_ERROR: disk full");
    }
}
