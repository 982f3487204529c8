//! Selection tracking.

use bevy::log::{debug, warn};

use super::history::HistoryEntry;
use super::state::FeatureEditor;
use super::tools::EditorTool;

impl FeatureEditor {
    /// Replace the selection and switch to the select tool.
    ///
    /// Positions are compared in order, so `[1, 0]` is a change from `[0, 1]`.
    /// Returns `false` without recording anything when the selection is
    /// unchanged or names a position outside the collection.
    pub fn set_selection(&mut self, positions: Vec<usize>) -> bool {
        if positions == self.selection {
            return false;
        }
        let len = self.collection.len();
        if let Some(bad) = positions.iter().find(|&&index| index >= len) {
            warn!(
                "Ignoring selection {:?}: position {} is outside {} features",
                positions, bad, len
            );
            return false;
        }

        let previous = std::mem::replace(&mut self.selection, positions);
        self.record(HistoryEntry::Selection {
            selected_feature_indexes: previous,
        });
        self.tool = EditorTool::Select;
        debug!("Selection changed to {:?}", self.selection);
        true
    }

    /// Select every feature, bottom to top.
    pub fn select_all(&mut self) -> bool {
        let all = (0..self.collection.len()).collect();
        self.set_selection(all)
    }
}
