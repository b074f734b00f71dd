//! Search settings
//!
//! Settings are immutable once built. The builder validates:
//! - relative_boost_threshold is finite and >= 1.0
//! - max_iter, when bounded, is positive
//! - the default state lies inside the configuration domain
//! - hardcoded lists only name hintsets/dops of the domain

use serde::Serialize;
use thiserror::Error;

use crate::oracle::{HintsetCode, QueryDop};

use super::domain::{is_valid_dop, is_valid_hintset, DEFAULT_DOP, DEFAULT_HINTSET};
use super::state::SearchingState;

/// Settings validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("relative_boost_threshold must be a finite value >= 1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("max_iter must be positive")]
    ZeroMaxIter,

    #[error("dop {0} is outside the configuration domain")]
    InvalidDop(QueryDop),

    #[error("hintset {0} is outside the configuration domain")]
    InvalidHintset(HintsetCode),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result type for settings construction
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Which neighbor rules are active and when to stop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSettings {
    disable_scans: bool,
    disable_joins: bool,
    decrease_dop: bool,
    disable_inl: bool,
    relative_boost_threshold: f64,
    /// `None` means unbounded
    max_iter: Option<u64>,
    use_joined_search: bool,
    default_hintset: HintsetCode,
    default_dop: QueryDop,
    hardcoded_hintsets: Option<Vec<HintsetCode>>,
    hardcoded_dops: Option<Vec<QueryDop>>,
}

impl SearchSettings {
    pub fn builder() -> SearchSettingsBuilder {
        SearchSettingsBuilder::default()
    }

    /// Builder pre-filled with these settings
    pub fn to_builder(&self) -> SearchSettingsBuilder {
        SearchSettingsBuilder {
            inner: self.clone(),
        }
    }

    pub fn disable_scans(&self) -> bool {
        self.disable_scans
    }

    pub fn disable_joins(&self) -> bool {
        self.disable_joins
    }

    pub fn decrease_dop(&self) -> bool {
        self.decrease_dop
    }

    pub fn disable_inl(&self) -> bool {
        self.disable_inl
    }

    pub fn relative_boost_threshold(&self) -> f64 {
        self.relative_boost_threshold
    }

    pub fn max_iter(&self) -> Option<u64> {
        self.max_iter
    }

    pub fn use_joined_search(&self) -> bool {
        self.use_joined_search
    }

    pub fn hardcoded_hintsets(&self) -> Option<&[HintsetCode]> {
        self.hardcoded_hintsets.as_deref()
    }

    pub fn hardcoded_dops(&self) -> Option<&[QueryDop]> {
        self.hardcoded_dops.as_deref()
    }

    /// Origin of the search
    pub fn default_state(&self) -> SearchingState {
        SearchingState::new(self.default_hintset, self.default_dop)
    }

    /// Whether another round fits the iteration budget
    pub fn within_budget(&self, iteration: u64) -> bool {
        self.max_iter.map_or(true, |max| iteration < max)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            disable_scans: false,
            disable_joins: false,
            decrease_dop: false,
            disable_inl: false,
            relative_boost_threshold: 1.0,
            max_iter: Some(1),
            use_joined_search: false,
            default_hintset: DEFAULT_HINTSET,
            default_dop: DEFAULT_DOP,
            hardcoded_hintsets: None,
            hardcoded_dops: None,
        }
    }
}

/// Validating builder for [`SearchSettings`]
#[derive(Debug, Clone, Default)]
pub struct SearchSettingsBuilder {
    inner: SearchSettings,
}

impl SearchSettingsBuilder {
    pub fn disable_scans(mut self, value: bool) -> Self {
        self.inner.disable_scans = value;
        self
    }

    pub fn disable_joins(mut self, value: bool) -> Self {
        self.inner.disable_joins = value;
        self
    }

    pub fn decrease_dop(mut self, value: bool) -> Self {
        self.inner.decrease_dop = value;
        self
    }

    pub fn disable_inl(mut self, value: bool) -> Self {
        self.inner.disable_inl = value;
        self
    }

    pub fn relative_boost_threshold(mut self, value: f64) -> Self {
        self.inner.relative_boost_threshold = value;
        self
    }

    pub fn max_iter(mut self, value: u64) -> Self {
        self.inner.max_iter = Some(value);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.inner.max_iter = None;
        self
    }

    pub fn use_joined_search(mut self, value: bool) -> Self {
        self.inner.use_joined_search = value;
        self
    }

    pub fn default_state(mut self, hintset: HintsetCode, dop: QueryDop) -> Self {
        self.inner.default_hintset = hintset;
        self.inner.default_dop = dop;
        self
    }

    pub fn hardcoded_hintsets(mut self, hintsets: Vec<HintsetCode>) -> Self {
        self.inner.hardcoded_hintsets = Some(hintsets);
        self
    }

    pub fn hardcoded_dops(mut self, dops: Vec<QueryDop>) -> Self {
        self.inner.hardcoded_dops = Some(dops);
        self
    }

    pub fn build(self) -> SettingsResult<SearchSettings> {
        let s = self.inner;

        let threshold = s.relative_boost_threshold;
        if !threshold.is_finite() || threshold < 1.0 {
            return Err(SettingsError::InvalidThreshold(threshold));
        }

        if s.max_iter == Some(0) {
            return Err(SettingsError::ZeroMaxIter);
        }

        if !is_valid_hintset(s.default_hintset) {
            return Err(SettingsError::InvalidHintset(s.default_hintset));
        }
        if !is_valid_dop(s.default_dop) {
            return Err(SettingsError::InvalidDop(s.default_dop));
        }

        if let Some(hintsets) = &s.hardcoded_hintsets {
            if let Some(&bad) = hintsets.iter().find(|h| !is_valid_hintset(**h)) {
                return Err(SettingsError::InvalidHintset(bad));
            }
        }
        if let Some(dops) = &s.hardcoded_dops {
            if let Some(&bad) = dops.iter().find(|d| !is_valid_dop(**d)) {
                return Err(SettingsError::InvalidDop(bad));
            }
        }

        Ok(s)
    }
}
