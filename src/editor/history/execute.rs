//! Undo and redo for the feature editor.

use std::mem;

use bevy::log::debug;

use super::super::state::FeatureEditor;
use super::super::tools::EditorTool;
use super::entry::HistoryEntry;

impl FeatureEditor {
    /// Undo the most recent entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop_undo() else {
            return false;
        };
        debug!("Undo: {}", entry.description());
        let reverse = self.restore(entry);
        self.history.push_redo(reverse);
        true
    }

    /// Redo the most recently undone entry. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.pop_redo() else {
            return false;
        };
        debug!("Redo: {}", entry.description());
        let reverse = self.restore(entry);
        self.history.push_undo(reverse);
        true
    }

    /// Swap the entry's state in and return the displaced state as the same kind of entry.
    fn restore(&mut self, entry: HistoryEntry) -> HistoryEntry {
        match entry {
            HistoryEntry::FeatureCollection {
                collection,
                selected_feature_indexes,
            } => {
                let current = mem::replace(&mut self.collection, collection);
                let displaced = self.selection.clone();
                if let Some(selection) = selected_feature_indexes {
                    self.selection = selection;
                }
                let len = self.collection.len();
                // Stale positions are dropped, never clamped onto another feature
                self.selection.retain(|&index| index < len);
                HistoryEntry::FeatureCollection {
                    collection: current,
                    selected_feature_indexes: Some(displaced),
                }
            }
            HistoryEntry::Selection {
                selected_feature_indexes,
            } => {
                self.tool = EditorTool::Select;
                let current = mem::replace(&mut self.selection, selected_feature_indexes);
                HistoryEntry::Selection {
                    selected_feature_indexes: current,
                }
            }
            HistoryEntry::Reordering {
                collection,
                selected_feature_indexes,
            } => {
                let current_collection = mem::replace(&mut self.collection, collection);
                let current_selection = mem::replace(&mut self.selection, selected_feature_indexes);
                HistoryEntry::Reordering {
                    collection: current_collection,
                    selected_feature_indexes: current_selection,
                }
            }
        }
    }
}
