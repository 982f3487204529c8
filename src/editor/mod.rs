//! Feature editing state engine.
//!
//! [`FeatureEditor`] owns the committed collection, the selection, the active
//! tool and the undo/redo history. It is plain data and fully usable without
//! Bevy; [`EditorPlugin`] exposes it to the app as a resource driven by
//! messages.
//!
//! ## Module Structure
//!
//! - [`state`] - FeatureEditor and EditorSnapshot
//! - [`document`] - Collection replacement and deletion
//! - [`selection`] - Selection tracking
//! - [`reorder`] - Z-order changes
//! - [`history`] - Undo/redo stacks
//! - [`tools`] / [`mode`] - Tool catalogue and mode resolution
//! - [`draft`] - Drag drafts and gesture edits
//! - [`shortcuts`] - Keyboard adapter
//! - [`systems`] - Message handlers

mod document;
mod draft;
mod history;
mod messages;
mod mode;
mod reorder;
mod selection;
mod shortcuts;
mod state;
mod systems;
mod tools;
mod view;

pub use draft::{AbandonedDragPolicy, DraftEdit, EditKind};
pub use messages::{
    DeleteSelectedRequest, DragEndRequest, DragStartRequest, GestureEditRequest,
    ImportGeojsonRequest, RedoRequest, ReorderRequest, ReplaceCollectionRequest,
    SelectAllRequest, SetSelectionRequest, SetToolRequest, SetViewStateRequest, UndoRequest,
};
pub use mode::{EditingMode, InteractionFlags};
pub use reorder::ReorderDirection;
pub use state::{EditorSnapshot, FeatureEditor};
pub use systems::ImportError;
pub use tools::EditorTool;
pub use view::ViewState;

use bevy::prelude::*;

/// Systems that mutate [`FeatureEditor`]. Persistence runs after this set so
/// a frame's edits are saved in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditorMutations;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeatureEditor>()
            .init_resource::<DraftEdit>()
            .init_resource::<InteractionFlags>()
            .init_resource::<ViewState>()
            .init_resource::<ImportError>()
            .add_message::<ReplaceCollectionRequest>()
            .add_message::<ImportGeojsonRequest>()
            .add_message::<DeleteSelectedRequest>()
            .add_message::<SetSelectionRequest>()
            .add_message::<SelectAllRequest>()
            .add_message::<SetToolRequest>()
            .add_message::<ReorderRequest>()
            .add_message::<UndoRequest>()
            .add_message::<RedoRequest>()
            .add_message::<GestureEditRequest>()
            .add_message::<DragStartRequest>()
            .add_message::<DragEndRequest>()
            .add_message::<SetViewStateRequest>()
            .add_systems(
                Update,
                (
                    shortcuts::handle_editor_shortcuts,
                    systems::replace_collection_system
                        .run_if(on_message::<ReplaceCollectionRequest>),
                    systems::import_geojson_system.run_if(on_message::<ImportGeojsonRequest>),
                    systems::delete_selected_system.run_if(on_message::<DeleteSelectedRequest>),
                    systems::set_selection_system.run_if(on_message::<SetSelectionRequest>),
                    systems::select_all_system.run_if(on_message::<SelectAllRequest>),
                    systems::set_tool_system.run_if(on_message::<SetToolRequest>),
                    systems::reorder_system.run_if(on_message::<ReorderRequest>),
                    systems::undo_system.run_if(on_message::<UndoRequest>),
                    systems::redo_system.run_if(on_message::<RedoRequest>),
                )
                    .chain()
                    .in_set(EditorMutations),
            )
            .add_systems(
                Update,
                (
                    systems::drag_start_system.run_if(on_message::<DragStartRequest>),
                    systems::gesture_edit_system.run_if(on_message::<GestureEditRequest>),
                    systems::drag_end_system.run_if(on_message::<DragEndRequest>),
                    systems::resolve_abandoned_drag,
                )
                    .chain()
                    .in_set(EditorMutations),
            )
            .add_systems(
                Update,
                (
                    systems::set_view_state_system.run_if(on_message::<SetViewStateRequest>),
                    (systems::sync_interaction_flags, systems::update_cursor_icon)
                        .chain()
                        .after(EditorMutations),
                ),
            );
    }
}
