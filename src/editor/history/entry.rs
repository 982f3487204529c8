//! History entry enum for undo/redo.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geojson::FeatureCollection;

/// One reversible unit of editor state, tagged by which sub-state it restores.
///
/// Entries always hold the state to go back *to*; applying one yields the
/// reverse entry for the opposite stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HistoryEntry {
    /// The whole collection was replaced. Entries produced by undo/redo also
    /// carry the selection they displaced, so stepping back reapplies it.
    #[serde(rename_all = "camelCase")]
    FeatureCollection {
        collection: Arc<FeatureCollection>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selected_feature_indexes: Option<Vec<usize>>,
    },
    /// Only the selection changed
    #[serde(rename_all = "camelCase")]
    Selection { selected_feature_indexes: Vec<usize> },
    /// Z-order changed; collection and selection are restored together
    #[serde(rename_all = "camelCase")]
    Reordering {
        collection: Arc<FeatureCollection>,
        selected_feature_indexes: Vec<usize>,
    },
}

impl HistoryEntry {
    pub fn description(&self) -> &'static str {
        match self {
            HistoryEntry::FeatureCollection { .. } => "Edit features",
            HistoryEntry::Selection { .. } => "Change selection",
            HistoryEntry::Reordering { .. } => "Reorder feature",
        }
    }
}
