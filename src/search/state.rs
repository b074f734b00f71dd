//! Search state: one point of the configuration space

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::oracle::{HintsetCode, OracleRequest, QueryDop};

use super::domain::{DEFAULT_DOP, DEFAULT_HINTSET};

/// A (hintset, dop) configuration.
///
/// Ordering is by hintset, then dop. Neighborhoods are emitted in this order,
/// which makes tie-breaking between equally fast candidates reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SearchingState {
    pub hintset: HintsetCode,
    pub dop: QueryDop,
}

impl SearchingState {
    pub fn new(hintset: HintsetCode, dop: QueryDop) -> Self {
        Self { hintset, dop }
    }

    /// Same dop, with additional operators disabled
    pub fn with_disabled(&self, mask: HintsetCode) -> Self {
        Self {
            hintset: self.hintset | mask,
            dop: self.dop,
        }
    }

    /// Same hintset, different dop
    pub fn with_dop(&self, dop: QueryDop) -> Self {
        Self {
            hintset: self.hintset,
            dop,
        }
    }

    pub fn request<'a>(&self, query_name: &'a str) -> OracleRequest<'a> {
        OracleRequest::new(query_name, self.hintset, self.dop)
    }
}

impl Default for SearchingState {
    fn default() -> Self {
        Self::new(DEFAULT_HINTSET, DEFAULT_DOP)
    }
}

impl fmt::Display for SearchingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(hintset={}, dop={})", self.hintset, self.dop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_default_state() {
        let state = SearchingState::default();
        assert_eq!(state.hintset, 0);
        assert_eq!(state.dop, 64);
    }

    #[test]
    fn test_disable_is_monotonic() {
        let state = SearchingState::new(0b0101, 16);
        let next = state.with_disabled(0b0011);
        assert_eq!(next.hintset, 0b0111);
        assert_eq!(next.dop, 16);
        // Re-disabling never clears a bit
        assert_eq!(next.with_disabled(0b0001), next);
    }

    #[test]
    fn test_order_by_hintset_then_dop() {
        let set: BTreeSet<_> = [
            SearchingState::new(2, 1),
            SearchingState::new(1, 64),
            SearchingState::new(1, 16),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                SearchingState::new(1, 16),
                SearchingState::new(1, 64),
                SearchingState::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_request() {
        let req = SearchingState::new(8, 16).request("q05");
        assert_eq!(req.query_name, "q05");
        assert_eq!(req.hintset, 8);
        assert_eq!(req.dop, 16);
    }
}
