//! Named search presets
//!
//! - greedy: operator-disable rules only
//! - local: adds index-nested-loop disabling (and joined dop search)
//! - pruned: a single round
//! - def_dop: the dop stays at its default
//! - all: exhaustive enumeration of the domain

use super::domain::{all_hintsets, DEFAULT_DOP, DOPS};
use super::settings::{SearchSettings, SettingsError, SettingsResult};

/// Preset names, in catalogue order
pub const PRESET_NAMES: [&str; 11] = [
    "empty",
    "greedy_def_dop",
    "pruned_greedy_def_dop",
    "greedy",
    "pruned_greedy",
    "local_def_dop",
    "pruned_local_def_dop",
    "local",
    "pruned_local",
    "all",
    "all_def_dop",
];

/// Looks up a preset by name (case-insensitive)
pub fn preset(name: &str) -> SettingsResult<SearchSettings> {
    let ops = SearchSettings::builder()
        .disable_scans(true)
        .disable_joins(true);

    let builder = match name.to_ascii_lowercase().as_str() {
        "empty" => SearchSettings::builder()
            .hardcoded_hintsets(Vec::new())
            .hardcoded_dops(Vec::new()),
        "greedy_def_dop" => ops.unbounded(),
        "pruned_greedy_def_dop" => ops.max_iter(1),
        "greedy" => ops.decrease_dop(true).unbounded(),
        "pruned_greedy" => ops.decrease_dop(true).max_iter(1),
        "local_def_dop" => ops.disable_inl(true).unbounded(),
        "pruned_local_def_dop" => ops.disable_inl(true).max_iter(1),
        "local" => ops
            .decrease_dop(true)
            .disable_inl(true)
            .use_joined_search(true)
            .unbounded(),
        "pruned_local" => ops
            .decrease_dop(true)
            .disable_inl(true)
            .use_joined_search(true)
            .max_iter(1),
        "all" => SearchSettings::builder()
            .hardcoded_hintsets(all_hintsets())
            .hardcoded_dops(DOPS.to_vec()),
        "all_def_dop" => SearchSettings::builder()
            .hardcoded_hintsets(all_hintsets())
            .hardcoded_dops(vec![DEFAULT_DOP]),
        _ => return Err(SettingsError::UnknownPreset(name.to_string())),
    };

    builder.build()
}
