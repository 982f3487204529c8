//! Z-order changes for a single selected feature.
//!
//! Later features are drawn on top, so "forward" moves toward the end of the
//! collection. Multi-selection reordering is not supported: every operation is
//! a silent no-op unless exactly one feature is selected.

use std::sync::Arc;

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::geojson::FeatureCollection;

use super::history::HistoryEntry;
use super::state::FeatureEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReorderDirection {
    BringToFront,
    BringForward,
    SendToBack,
    SendBackward,
}

impl ReorderDirection {
    pub fn display_name(&self) -> &'static str {
        match self {
            ReorderDirection::BringToFront => "Bring to Front",
            ReorderDirection::BringForward => "Bring Forward",
            ReorderDirection::SendToBack => "Send to Back",
            ReorderDirection::SendBackward => "Send Backward",
        }
    }

    /// Destination of the feature at `index` in a collection of `len`, or
    /// `None` when it already sits at the boundary it moves toward.
    fn target(&self, index: usize, len: usize) -> Option<usize> {
        let target = match self {
            ReorderDirection::BringToFront | ReorderDirection::BringForward
                if index + 1 >= len =>
            {
                return None;
            }
            ReorderDirection::SendToBack | ReorderDirection::SendBackward if index == 0 => {
                return None;
            }
            ReorderDirection::BringToFront => len - 1,
            ReorderDirection::BringForward => index + 1,
            ReorderDirection::SendToBack => 0,
            ReorderDirection::SendBackward => index - 1,
        };
        Some(target)
    }
}

impl FeatureEditor {
    /// Move the single selected feature. Returns `false` when nothing moved.
    ///
    /// The moved feature keeps its id. One entry restores both the previous
    /// order and the previous selection.
    pub fn reorder(&mut self, direction: ReorderDirection) -> bool {
        let &[index] = self.selection.as_slice() else {
            debug!(
                "{} ignored: {} features selected",
                direction.display_name(),
                self.selection.len()
            );
            return false;
        };
        let len = self.collection.len();
        if index >= len {
            return false;
        }
        let Some(target) = direction.target(index, len) else {
            debug!("{} ignored: feature {} is at the boundary", direction.display_name(), index);
            return false;
        };

        let mut features = self.collection.features.clone();
        match direction {
            ReorderDirection::BringToFront | ReorderDirection::SendToBack => {
                let feature = features.remove(index);
                features.insert(target, feature);
            }
            ReorderDirection::BringForward | ReorderDirection::SendBackward => {
                features.swap(index, target);
            }
        }

        let previous_collection =
            std::mem::replace(&mut self.collection, Arc::new(FeatureCollection::new(features)));
        let previous_selection = std::mem::replace(&mut self.selection, vec![target]);
        self.record(HistoryEntry::Reordering {
            collection: previous_collection,
            selected_feature_indexes: previous_selection,
        });
        debug!("{}: feature {} -> {}", direction.display_name(), index, target);
        true
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.reorder(ReorderDirection::BringToFront)
    }

    pub fn bring_forward(&mut self) -> bool {
        self.reorder(ReorderDirection::BringForward)
    }

    pub fn send_to_back(&mut self) -> bool {
        self.reorder(ReorderDirection::SendToBack)
    }

    pub fn send_backward(&mut self) -> bool {
        self.reorder(ReorderDirection::SendBackward)
    }
}
