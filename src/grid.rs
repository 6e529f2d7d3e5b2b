//! Grid column-state persistence
//!
//! Each data grid's column order, visibility, width, and sort state is
//! serialized to the preference store under a caller-supplied key and
//! restored on demand. Dirty detection is a deep compare of the live state
//! against the persisted one; column order matters, so two states with the
//! same columns in a different order are dirty.

use crate::error::Result;
use crate::prefs::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sort direction applied to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// One column's persisted attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column identifier (matches the grid's field name)
    pub id: String,
    /// Whether the column is shown
    pub visible: bool,
    /// Pixel width, when the operator resized it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Active sort on this column, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

/// Full column state of one grid; vector order is display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnState {
    /// Columns in display order
    pub columns: Vec<ColumnSpec>,
}

/// Persists per-grid column state in the preference store
pub struct GridStateStore {
    prefs: Arc<PreferenceStore>,
}

impl GridStateStore {
    /// Creates a store over the shared preference file
    pub fn new(prefs: Arc<PreferenceStore>) -> Self {
        Self { prefs }
    }

    /// Saves `state` under `grid_key`
    pub fn save(&self, grid_key: &str, state: &ColumnState) -> Result<()> {
        self.prefs.set_json(&pref_key(grid_key), state)
    }

    /// Restores the state saved under `grid_key`, if any
    pub fn load(&self, grid_key: &str) -> Result<Option<ColumnState>> {
        self.prefs.get_json(&pref_key(grid_key))
    }

    /// True when `live` differs from the persisted state
    ///
    /// A grid with no persisted state is dirty as soon as it has any
    /// columns: there is something worth saving.
    pub fn is_dirty(&self, grid_key: &str, live: &ColumnState) -> Result<bool> {
        match self.load(grid_key)? {
            None => Ok(!live.columns.is_empty()),
            Some(saved) => Ok(saved != *live),
        }
    }

    /// Drops the persisted state for `grid_key`
    pub fn reset(&self, grid_key: &str) -> Result<()> {
        self.prefs.remove(&pref_key(grid_key))
    }
}

fn pref_key(grid_key: &str) -> String {
    format!("grid:{}", grid_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, GridStateStore) {
        let (dir, prefs) = crate::test_utils::temp_prefs();
        (dir, GridStateStore::new(prefs))
    }

    fn sample_state() -> ColumnState {
        ColumnState {
            columns: vec![
                ColumnSpec {
                    id: "title".to_string(),
                    visible: true,
                    width: Some(240),
                    sort: Some(SortOrder::Desc),
                },
                ColumnSpec {
                    id: "status".to_string(),
                    visible: false,
                    width: None,
                    sort: None,
                },
            ],
        }
    }

    #[test]
    fn test_save_and_restore_round_trip() {
        let (_dir, store) = store();
        let state = sample_state();
        store.save("news", &state).unwrap();
        assert_eq!(store.load("news").unwrap(), Some(state));
    }

    #[test]
    fn test_unsaved_grid_loads_none() {
        let (_dir, store) = store();
        assert_eq!(store.load("deposits").unwrap(), None);
    }

    #[test]
    fn test_dirty_when_live_differs() {
        let (_dir, store) = store();
        let state = sample_state();
        store.save("news", &state).unwrap();
        assert!(!store.is_dirty("news", &state).unwrap());

        let mut changed = state.clone();
        changed.columns[1].visible = true;
        assert!(store.is_dirty("news", &changed).unwrap());
    }

    #[test]
    fn test_column_order_is_significant() {
        let (_dir, store) = store();
        let state = sample_state();
        store.save("news", &state).unwrap();

        let mut reordered = state;
        reordered.columns.reverse();
        assert!(store.is_dirty("news", &reordered).unwrap());
    }

    #[test]
    fn test_reset_clears_saved_state() {
        let (_dir, store) = store();
        store.save("news", &sample_state()).unwrap();
        store.reset("news").unwrap();
        assert_eq!(store.load("news").unwrap(), None);
        // An empty live state against no saved state is clean.
        assert!(!store.is_dirty("news", &ColumnState::default()).unwrap());
    }

    #[test]
    fn test_grids_are_isolated_by_key() {
        let (_dir, store) = store();
        store.save("news", &sample_state()).unwrap();
        assert_eq!(store.load("popups").unwrap(), None);
    }
}
