//! Neighbor generation
//!
//! Rules (each guarded by its settings flag), applied under every dop in
//! scope:
//! - disable_scans: disable one more scan operator
//! - disable_joins: disable one more join operator
//! - disable_inl: disable index nested loop joins
//! - decrease_dop: same hintset, any strictly smaller dop
//!
//! Dops in scope are the current one, or the whole domain when both
//! use_joined_search and decrease_dop are set. When both hardcoded lists are
//! present their cross product is added as well.

use std::collections::BTreeSet;

use super::domain::{DOPS, N_JOINS, N_SCANS, OFF_INL_HINT};
use super::settings::SearchSettings;
use super::state::SearchingState;

/// Configurations reachable from `state` in one step.
///
/// The result always contains `state`, has no duplicates and is sorted by
/// (hintset, dop).
pub fn neighbors(state: &SearchingState, settings: &SearchSettings) -> Vec<SearchingState> {
    let mut out = BTreeSet::new();
    out.insert(*state);

    let dops: Vec<_> = if settings.use_joined_search() && settings.decrease_dop() {
        DOPS.to_vec()
    } else {
        vec![state.dop]
    };

    for dop in dops {
        let base = state.with_dop(dop);

        if settings.disable_scans() {
            for op in 0..N_SCANS {
                out.insert(base.with_disabled(1 << op));
            }
        }

        if settings.disable_joins() {
            for op in N_SCANS..N_SCANS + N_JOINS {
                out.insert(base.with_disabled(1 << op));
            }
        }

        if settings.disable_inl() {
            out.insert(base.with_disabled(OFF_INL_HINT));
        }

        if settings.decrease_dop() {
            for smaller in DOPS.iter().copied().filter(|d| *d < dop) {
                out.insert(state.with_dop(smaller));
            }
        }
    }

    if let (Some(hintsets), Some(dops)) = (settings.hardcoded_hintsets(), settings.hardcoded_dops())
    {
        for &hintset in hintsets {
            for &dop in dops {
                out.insert(SearchingState::new(hintset, dop));
            }
        }
    }

    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::presets::preset;

    fn s(hintset: u32, dop: u32) -> SearchingState {
        SearchingState::new(hintset, dop)
    }

    #[test]
    fn test_degenerate_settings_only_self() {
        let settings = SearchSettings::default();
        assert_eq!(neighbors(&s(0, 64), &settings), vec![s(0, 64)]);

        let empty = preset("empty").unwrap();
        assert_eq!(neighbors(&s(0, 64), &empty), vec![s(0, 64)]);
    }

    #[test]
    fn test_scans_only() {
        let settings = SearchSettings::builder().disable_scans(true).build().unwrap();
        assert_eq!(
            neighbors(&s(0, 64), &settings),
            vec![s(0, 64), s(1, 64), s(2, 64), s(4, 64), s(8, 64)]
        );
    }

    #[test]
    fn test_joins_only() {
        let settings = SearchSettings::builder().disable_joins(true).build().unwrap();
        assert_eq!(
            neighbors(&s(0, 16), &settings),
            vec![s(0, 16), s(16, 16), s(32, 16), s(64, 16)]
        );
    }

    #[test]
    fn test_already_disabled_bit_collapses_to_self() {
        let settings = SearchSettings::builder().disable_scans(true).build().unwrap();
        let out = neighbors(&s(1, 64), &settings);
        assert_eq!(out, vec![s(1, 64), s(3, 64), s(5, 64), s(9, 64)]);
    }

    #[test]
    fn test_inl_mask() {
        let settings = SearchSettings::builder().disable_inl(true).build().unwrap();
        assert_eq!(neighbors(&s(0, 64), &settings), vec![s(0, 64), s(74, 64)]);
    }

    #[test]
    fn test_decrease_dop_separate() {
        let settings = SearchSettings::builder().decrease_dop(true).build().unwrap();
        assert_eq!(
            neighbors(&s(5, 64), &settings),
            vec![s(5, 1), s(5, 16), s(5, 64)]
        );
        assert_eq!(neighbors(&s(5, 1), &settings), vec![s(5, 1)]);
    }

    #[test]
    fn test_joined_search_spans_all_dops() {
        let settings = SearchSettings::builder()
            .disable_inl(true)
            .decrease_dop(true)
            .use_joined_search(true)
            .build()
            .unwrap();
        let out = neighbors(&s(0, 16), &settings);
        // inl under every dop, plus smaller dops of every dop in scope
        assert_eq!(
            out,
            vec![s(0, 1), s(0, 16), s(74, 1), s(74, 16), s(74, 64)]
        );
    }

    #[test]
    fn test_joined_search_requires_decrease_dop() {
        let settings = SearchSettings::builder()
            .disable_inl(true)
            .use_joined_search(true)
            .build()
            .unwrap();
        assert_eq!(neighbors(&s(0, 16), &settings), vec![s(0, 16), s(74, 16)]);
    }

    #[test]
    fn test_local_preset_size_and_order() {
        let settings = preset("local").unwrap();
        let out = neighbors(&s(0, 64), &settings);
        assert!(out.contains(&s(0, 64)));
        let mut sorted = out.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(out, sorted);
        // 3 dops x (7 single bits + inl) + current dop variations
        assert_eq!(out.len(), 3 * 8 + 3);
    }

    #[test]
    fn test_hardcoded_cross_product() {
        let settings = preset("all_def_dop").unwrap();
        let out = neighbors(&s(0, 64), &settings);
        assert_eq!(out.len(), 128);
        assert!(out.iter().all(|st| st.dop == 64));
    }

    #[test]
    fn test_reflexive_everywhere() {
        let settings = preset("local").unwrap();
        for hintset in [0, 3, 74, 127] {
            for dop in DOPS {
                assert!(neighbors(&s(hintset, dop), &settings).contains(&s(hintset, dop)));
            }
        }
    }
}
