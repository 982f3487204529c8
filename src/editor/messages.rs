//! Message types for editor operations.
//!
//! Every mutation of [`FeatureEditor`](super::FeatureEditor) from outside the
//! engine arrives as one of these messages.

use bevy::prelude::*;

use crate::geojson::FeatureCollection;

use super::draft::EditKind;
use super::reorder::ReorderDirection;
use super::tools::EditorTool;
use super::view::ViewState;

#[derive(Message)]
pub struct ReplaceCollectionRequest {
    pub collection: FeatureCollection,
}

/// Raw GeoJSON text from the source panel. Validated before commit.
#[derive(Message)]
pub struct ImportGeojsonRequest {
    pub text: String,
}

#[derive(Message)]
pub struct DeleteSelectedRequest;

#[derive(Message)]
pub struct SetSelectionRequest {
    pub positions: Vec<usize>,
}

#[derive(Message)]
pub struct SelectAllRequest;

#[derive(Message)]
pub struct SetToolRequest {
    pub tool: EditorTool,
}

#[derive(Message)]
pub struct ReorderRequest(pub ReorderDirection);

#[derive(Message)]
pub struct UndoRequest;

#[derive(Message)]
pub struct RedoRequest;

/// An edit reported by the gesture layer, carrying the whole edited collection.
#[derive(Message)]
pub struct GestureEditRequest {
    pub collection: FeatureCollection,
    pub kind: EditKind,
}

#[derive(Message)]
pub struct DragStartRequest;

/// Pointer released after a drag; commits the draft.
#[derive(Message)]
pub struct DragEndRequest;

#[derive(Message)]
pub struct SetViewStateRequest(pub ViewState);
