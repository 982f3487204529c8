//! Whole-collection edits: replacement and deletion.

use std::sync::Arc;

use bevy::log::debug;

use crate::geojson::FeatureCollection;

use super::history::HistoryEntry;
use super::state::FeatureEditor;
use super::tools::EditorTool;

impl FeatureEditor {
    /// Commit `next` as the new collection.
    ///
    /// Every feature gets a freshly generated id. When the feature count
    /// changes, the last feature becomes the selection and the select tool is
    /// activated so a newly drawn feature is immediately manipulable.
    pub fn replace_collection(&mut self, next: FeatureCollection) {
        let next = next.with_fresh_ids();
        let previous_len = self.collection.len();
        let next_len = next.len();

        self.record(HistoryEntry::FeatureCollection {
            collection: Arc::clone(&self.collection),
            selected_feature_indexes: None,
        });

        if next.is_empty() {
            self.selection = Vec::new();
        } else if next_len != previous_len {
            self.selection = vec![next_len - 1];
            self.tool = EditorTool::Select;
        }
        self.collection = Arc::new(next);

        debug!(
            "Collection replaced: {} -> {} features, selection {:?}",
            previous_len, next_len, self.selection
        );
    }

    /// Remove every selected feature, committing the result like [`Self::replace_collection`].
    pub fn delete_selected(&mut self) {
        let features = self
            .collection
            .features
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.selection.contains(index))
            .map(|(_, feature)| feature.clone())
            .collect();
        self.replace_collection(FeatureCollection::new(features));
    }
}
