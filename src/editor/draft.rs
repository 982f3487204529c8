//! In-progress drag edits.
//!
//! While the pointer is dragging, every frame's edited collection is buffered
//! here instead of being committed, so a whole drag becomes a single undo step.
//! A drag always ends in exactly one of: commit via
//! [`FeatureEditor::replace_collection`], or discard.

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geojson::FeatureCollection;

use super::state::FeatureEditor;
use super::tools::EditorTool;

/// What to do with a pending draft when a drag ends without a proper release
/// (cursor left the window, focus lost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonedDragPolicy {
    #[default]
    Commit,
    Discard,
}

/// Kind of edit reported by the gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    AddFeature,
    Other,
}

#[derive(Resource, Debug, Default)]
pub struct DraftEdit {
    dragging: bool,
    pending: Option<FeatureCollection>,
}

impl DraftEdit {
    pub fn begin(&mut self) {
        self.dragging = true;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pending(&self) -> Option<&FeatureCollection> {
        self.pending.as_ref()
    }

    /// Buffer the latest frame of the drag.
    pub fn update(&mut self, frame: FeatureCollection) {
        self.pending = Some(frame);
    }

    /// End the drag, committing the last buffered frame if there is one.
    pub fn commit(&mut self, editor: &mut FeatureEditor) -> bool {
        self.dragging = false;
        match self.pending.take() {
            Some(collection) => {
                debug!("Committing drag with {} features", collection.len());
                editor.replace_collection(collection);
                true
            }
            None => false,
        }
    }

    /// End the drag, dropping any buffered frame.
    pub fn discard(&mut self) -> bool {
        self.dragging = false;
        self.pending.take().is_some()
    }

    /// Settle a drag that ended abnormally. Returns whether a commit happened.
    pub fn resolve_abandoned(
        &mut self,
        policy: AbandonedDragPolicy,
        editor: &mut FeatureEditor,
    ) -> bool {
        if !self.dragging && self.pending.is_none() {
            return false;
        }
        info!("Drag abandoned, applying {:?} policy", policy);
        match policy {
            AbandonedDragPolicy::Commit => self.commit(editor),
            AbandonedDragPolicy::Discard => {
                self.discard();
                false
            }
        }
    }

    /// What the renderer should draw: the draft while dragging, else the
    /// committed collection.
    #[allow(dead_code)]
    pub fn display_collection<'a>(&'a self, editor: &'a FeatureEditor) -> &'a FeatureCollection {
        self.pending.as_ref().unwrap_or_else(|| editor.collection())
    }

    /// Route an edit from the gesture layer.
    ///
    /// During a drag the edit only updates the draft. Otherwise edits that do
    /// not change the feature count are ignored (the gesture layer reports
    /// plain clicks as edits too). A feature added with the typed marker tool
    /// gets `{"type": typed_marker_kind}` as its properties.
    pub fn apply_gesture_edit(
        &mut self,
        editor: &mut FeatureEditor,
        mut updated: FeatureCollection,
        kind: EditKind,
        typed_marker_kind: &str,
    ) -> bool {
        if self.dragging {
            self.update(updated);
            return false;
        }
        if updated.len() == editor.collection().len() {
            return false;
        }
        if kind == EditKind::AddFeature
            && editor.tool() == EditorTool::TypedMarker
            && let Some(added) = updated.features.last_mut()
        {
            let mut properties = Map::new();
            properties.insert("type".to_string(), Value::from(typed_marker_kind));
            added.properties = properties;
        }
        editor.replace_collection(updated);
        true
    }
}
