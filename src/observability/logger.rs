//! Structured JSON logger
//!
//! - One log line = one JSON object
//! - `event` first, `severity` second, remaining keys sorted
//! - Synchronous, no buffering
//! - Written to stderr; stdout carries command output only
//! - Lines below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-round search detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// JSON line logger
pub struct Logger;

impl Logger {
    /// Sets the minimum severity for the whole process
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        let line = Self::format_line(severity, event, fields);
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Renders one log line, newline included
    pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = fields.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        push_json_string(&mut line, event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, severity.as_str());
        for (key, value) in sorted {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }
        line.push_str("}\n");
        line
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}

fn push_json_string(out: &mut String, value: &str) {
    // Serializing a &str cannot fail
    match serde_json::to_string(value) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("trace".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warn);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_line_is_json() {
        let line = Logger::format_line(Severity::Info, "SEARCH_START", &[("query", "q01")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "SEARCH_START");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["query"], "q01");
    }

    #[test]
    fn test_fields_sorted_after_event_and_severity() {
        let a = Logger::format_line(
            Severity::Trace,
            "SEARCH_ROUND",
            &[("rounds", "2"), ("best_state", "x"), ("iteration", "1")],
        );
        let b = Logger::format_line(
            Severity::Trace,
            "SEARCH_ROUND",
            &[("iteration", "1"), ("rounds", "2"), ("best_state", "x")],
        );
        assert_eq!(a, b);

        let event = a.find("\"event\"").unwrap();
        let severity = a.find("\"severity\"").unwrap();
        let best = a.find("\"best_state\"").unwrap();
        let iteration = a.find("\"iteration\"").unwrap();
        let rounds = a.find("\"rounds\"").unwrap();
        assert!(event < severity && severity < best);
        assert!(best < iteration && iteration < rounds);
    }

    #[test]
    fn test_escaping() {
        let line = Logger::format_line(
            Severity::Error,
            "SWEEP_QUERY_FAILED",
            &[("reason", "bad \"key\"\nnext")],
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["reason"], "bad \"key\"\nnext");
        assert_eq!(line.matches('\n').count(), 1);
    }
}
