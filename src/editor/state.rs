//! The feature editor controller: sole owner of all committed editing state.
//!
//! The collection is held behind an [`Arc`] and never mutated in place. Every
//! edit builds a new collection and swaps the reference, so history entries and
//! snapshots can share collections freely.

use std::sync::Arc;

use bevy::log::info;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geojson::{FeatureCollection, ValidationError, parse_feature_collection};

use super::history::{CommandHistory, HistoryEntry};
use super::mode::{EditingMode, resolve_mode};
use super::tools::EditorTool;

#[derive(Resource, Debug, Clone, Default)]
pub struct FeatureEditor {
    pub(super) collection: Arc<FeatureCollection>,
    pub(super) selection: Vec<usize>,
    pub(super) tool: EditorTool,
    pub(super) history: CommandHistory,
}

/// Serializable copy of the committed editor state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub feature_collection: Arc<FeatureCollection>,
    #[serde(default)]
    pub selected_feature_indexes: Vec<usize>,
    #[serde(default)]
    pub tool: EditorTool,
    #[serde(default)]
    pub undo_stack: Vec<HistoryEntry>,
    #[serde(default)]
    pub redo_stack: Vec<HistoryEntry>,
}

impl FeatureEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an editor from a snapshot, dropping selection positions that do
    /// not fit the collection.
    pub fn from_snapshot(snapshot: EditorSnapshot) -> Self {
        let len = snapshot.feature_collection.len();
        let mut selection = snapshot.selected_feature_indexes;
        selection.retain(|&index| index < len);
        Self {
            collection: snapshot.feature_collection,
            selection,
            tool: snapshot.tool,
            history: CommandHistory::from_stacks(snapshot.undo_stack, snapshot.redo_stack),
        }
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            feature_collection: Arc::clone(&self.collection),
            selected_feature_indexes: self.selection.clone(),
            tool: self.tool,
            undo_stack: self.history.undo_entries().to_vec(),
            redo_stack: self.history.redo_entries().to_vec(),
        }
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Shared handle to the current collection.
    pub fn collection_arc(&self) -> Arc<FeatureCollection> {
        Arc::clone(&self.collection)
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    /// Switch tools. Tool changes are not recorded in history.
    pub fn set_tool(&mut self, tool: EditorTool) {
        if self.tool != tool {
            info!("Tool changed to {:?}", tool);
            self.tool = tool;
        }
    }

    /// The mode pointer input should use right now.
    pub fn editing_mode(&self) -> EditingMode {
        resolve_mode(self.tool, &self.selection)
    }

    /// Parse and validate a raw GeoJSON document, then commit it as the new
    /// collection. Rejected documents leave all state untouched.
    pub fn import_geojson(&mut self, text: &str) -> Result<(), ValidationError> {
        let collection = parse_feature_collection(text)?;
        self.replace_collection(collection);
        Ok(())
    }

    /// The current collection in GeoJSON exchange format.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.collection)
    }

    /// Return to the initial empty state, discarding all history.
    pub fn reset(&mut self) {
        info!("Resetting editor state");
        *self = Self::default();
    }

    pub(super) fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::{Feature, Geometry};

    fn two_points() -> FeatureCollection {
        FeatureCollection::new(vec![
            Feature::new(Geometry::point([0.0, 0.0])),
            Feature::new(Geometry::point([1.0, 1.0])),
        ])
    }

    #[test]
    fn test_initial_state() {
        let editor = FeatureEditor::new();
        assert!(editor.collection().is_empty());
        assert!(editor.selection().is_empty());
        assert_eq!(editor.tool(), EditorTool::Hand);
        assert_eq!(editor.undo_count(), 0);
        assert_eq!(editor.redo_count(), 0);
    }

    #[test]
    fn test_set_tool_is_not_recorded() {
        let mut editor = FeatureEditor::new();
        editor.set_tool(EditorTool::Polygon);
        assert_eq!(editor.tool(), EditorTool::Polygon);
        assert_eq!(editor.undo_count(), 0);
    }

    #[test]
    fn test_editing_mode_follows_tool_and_selection() {
        let mut editor = FeatureEditor::new();
        editor.replace_collection(two_points());
        assert_eq!(editor.tool(), EditorTool::Select);
        assert_eq!(editor.editing_mode(), EditingMode::Transform);

        editor.set_selection(vec![]);
        assert_eq!(editor.editing_mode(), EditingMode::View);
    }

    #[test]
    fn test_import_rejects_invalid_document_without_side_effects() {
        let mut editor = FeatureEditor::new();
        editor.replace_collection(two_points());
        let before = editor.snapshot();

        let result = editor.import_geojson(r#"{"type":"FeatureCollection","features":[{"type":"Feature"}]}"#);

        assert!(result.is_err());
        assert_eq!(editor.snapshot(), before);
    }

    #[test]
    fn test_import_commits_valid_document() {
        let mut editor = FeatureEditor::new();
        editor
            .import_geojson(
                r#"{"type":"FeatureCollection","features":[
                    {"type":"Feature","geometry":{"type":"Point","coordinates":[3,4]},"properties":{"name":"x"}}
                ]}"#,
            )
            .unwrap();
        assert_eq!(editor.collection().len(), 1);
        assert_eq!(editor.collection().features[0].properties["name"], "x");
        assert_eq!(editor.undo_count(), 1);
    }

    #[test]
    fn test_snapshot_json_roundtrips_through_validator() {
        let mut editor = FeatureEditor::new();
        editor.replace_collection(two_points());
        let json = editor.snapshot_json().unwrap();
        let parsed = parse_feature_collection(&json).unwrap();
        assert_eq!(&parsed, editor.collection());
    }

    #[test]
    fn test_snapshot_restores_equivalent_editor() {
        let mut editor = FeatureEditor::new();
        editor.replace_collection(two_points());
        editor.set_selection(vec![0]);
        editor.bring_to_front();

        let restored = FeatureEditor::from_snapshot(editor.snapshot());
        assert_eq!(restored.snapshot(), editor.snapshot());
    }

    #[test]
    fn test_from_snapshot_drops_out_of_range_selection() {
        let snapshot = EditorSnapshot {
            feature_collection: Arc::new(two_points()),
            selected_feature_indexes: vec![1, 5],
            ..Default::default()
        };
        let editor = FeatureEditor::from_snapshot(snapshot);
        assert_eq!(editor.selection(), &[1]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut editor = FeatureEditor::new();
        editor.replace_collection(two_points());
        editor.reset();
        assert!(editor.collection().is_empty());
        assert_eq!(editor.undo_count(), 0);
        assert_eq!(editor.tool(), EditorTool::default());
    }
}
