//! Observability for hbosearch
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Monotonic search counters
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a search result
//! 2. No background threads
//! 3. Deterministic output for deterministic input
//!
//! # Usage
//!
//! ```ignore
//! use hbosearch::observability::{Event, Logger, ObservationScope};
//!
//! Logger::info(Event::ConfigLoaded.as_str(), &[("preset", "local")]);
//!
//! let scope = ObservationScope::new("ORACLE_LOAD");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, SearchMetrics};
pub use scope::ObservationScope;

/// Logs an event at the severity it implies
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
