//! Begin/complete logging around a unit of work
//!
//! - `{name}_BEGIN` on creation
//! - `{name}_COMPLETE` with `elapsed_ms` on `complete`
//! - `{name}_FAILED` on `fail`
//! - `{name}_INCOMPLETE` (WARN) if dropped unfinished

use std::time::Instant;

use super::logger::Logger;

pub struct ObservationScope<'a> {
    name: &'a str,
    fields: Vec<(&'a str, String)>,
    started: Instant,
    finished: bool,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Scope whose fields are repeated on every line it logs
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let scope = Self {
            name,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            started: Instant::now(),
            finished: false,
        };
        Logger::info(&format!("{}_BEGIN", name), &scope.field_refs(&[]));
        scope
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.elapsed_ms().to_string();
        let mut fields = self.field_refs(extra);
        fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        let mut fields = self.field_refs(&[]);
        fields.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &fields);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn field_refs<'s>(&'s self, extra: &[(&'s str, &'s str)]) -> Vec<(&'s str, &'s str)> {
        self.fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(extra.iter().copied())
            .collect()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
