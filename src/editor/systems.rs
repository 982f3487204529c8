//! Bevy systems that apply editor messages to the [`FeatureEditor`] resource.

use bevy::prelude::*;
use bevy::window::{CursorIcon, CursorLeft, PrimaryWindow, SystemCursorIcon, WindowFocused};

use crate::config::EditorConfig;

use super::draft::DraftEdit;
use super::messages::{
    DeleteSelectedRequest, DragEndRequest, DragStartRequest, GestureEditRequest,
    ImportGeojsonRequest, RedoRequest, ReorderRequest, ReplaceCollectionRequest,
    SelectAllRequest, SetSelectionRequest, SetToolRequest, SetViewStateRequest, UndoRequest,
};
use super::mode::InteractionFlags;
use super::state::FeatureEditor;
use super::tools::EditorTool;
use super::view::ViewState;

/// Last rejected GeoJSON import, for display next to the source panel.
#[derive(Resource, Default)]
pub struct ImportError {
    pub message: Option<String>,
}

pub fn replace_collection_system(
    mut events: MessageReader<ReplaceCollectionRequest>,
    mut editor: ResMut<FeatureEditor>,
) {
    for event in events.read() {
        editor.replace_collection(event.collection.clone());
    }
}

pub fn import_geojson_system(
    mut events: MessageReader<ImportGeojsonRequest>,
    mut editor: ResMut<FeatureEditor>,
    mut import_error: ResMut<ImportError>,
) {
    for event in events.read() {
        match editor.import_geojson(&event.text) {
            Ok(()) => {
                info!("Imported {} features", editor.collection().len());
                import_error.message = None;
            }
            Err(e) => {
                warn!("Rejected GeoJSON import: {}", e);
                import_error.message = Some(e.to_string());
            }
        }
    }
}

pub fn delete_selected_system(
    mut events: MessageReader<DeleteSelectedRequest>,
    mut editor: ResMut<FeatureEditor>,
) {
    for _ in events.read() {
        editor.delete_selected();
    }
}

pub fn set_selection_system(
    mut events: MessageReader<SetSelectionRequest>,
    mut editor: ResMut<FeatureEditor>,
) {
    for event in events.read() {
        editor.set_selection(event.positions.clone());
    }
}

pub fn select_all_system(
    mut events: MessageReader<SelectAllRequest>,
    mut editor: ResMut<FeatureEditor>,
) {
    for _ in events.read() {
        editor.select_all();
    }
}

pub fn set_tool_system(mut events: MessageReader<SetToolRequest>, mut editor: ResMut<FeatureEditor>) {
    for event in events.read() {
        editor.set_tool(event.tool);
    }
}

pub fn reorder_system(mut events: MessageReader<ReorderRequest>, mut editor: ResMut<FeatureEditor>) {
    for ReorderRequest(direction) in events.read() {
        editor.reorder(*direction);
    }
}

pub fn undo_system(mut events: MessageReader<UndoRequest>, mut editor: ResMut<FeatureEditor>) {
    for _ in events.read() {
        if !editor.undo() {
            debug!("Nothing to undo");
        }
    }
}

pub fn redo_system(mut events: MessageReader<RedoRequest>, mut editor: ResMut<FeatureEditor>) {
    for _ in events.read() {
        if !editor.redo() {
            debug!("Nothing to redo");
        }
    }
}

pub fn drag_start_system(mut events: MessageReader<DragStartRequest>, mut draft: ResMut<DraftEdit>) {
    for _ in events.read() {
        draft.begin();
    }
}

pub fn gesture_edit_system(
    mut events: MessageReader<GestureEditRequest>,
    mut editor: ResMut<FeatureEditor>,
    mut draft: ResMut<DraftEdit>,
    config: Res<EditorConfig>,
) {
    for event in events.read() {
        draft.apply_gesture_edit(
            &mut editor,
            event.collection.clone(),
            event.kind,
            &config.data.typed_marker_kind,
        );
    }
}

pub fn drag_end_system(
    mut events: MessageReader<DragEndRequest>,
    mut editor: ResMut<FeatureEditor>,
    mut draft: ResMut<DraftEdit>,
) {
    for _ in events.read() {
        draft.commit(&mut editor);
    }
}

/// Settle an in-progress drag when the pointer leaves the window or the window
/// loses focus, since no release will arrive.
pub fn resolve_abandoned_drag(
    mut cursor_left: MessageReader<CursorLeft>,
    mut focus: MessageReader<WindowFocused>,
    mut editor: ResMut<FeatureEditor>,
    mut draft: ResMut<DraftEdit>,
    config: Res<EditorConfig>,
) {
    let left = cursor_left.read().count() > 0;
    let unfocused = focus.read().any(|event| !event.focused);
    if (left || unfocused) && draft.is_dragging() {
        draft.resolve_abandoned(config.data.abandoned_drag, &mut editor);
    }
}

pub fn set_view_state_system(
    mut events: MessageReader<SetViewStateRequest>,
    mut view: ResMut<ViewState>,
) {
    for SetViewStateRequest(next) in events.read() {
        view.set_if_neq(*next);
    }
}

/// Recompute interaction flags from the tool and the space key. Releasing
/// space falls back to whatever the active tool implies.
pub fn sync_interaction_flags(
    keyboard: Res<ButtonInput<KeyCode>>,
    editor: Res<FeatureEditor>,
    mut flags: ResMut<InteractionFlags>,
) {
    let space_held = keyboard.pressed(KeyCode::Space);
    flags.set_if_neq(InteractionFlags::for_tool(editor.tool(), space_held));
}

pub fn update_cursor_icon(
    editor: Res<FeatureEditor>,
    flags: Res<InteractionFlags>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
) {
    if !editor.is_changed() && !flags.is_changed() {
        return;
    }
    let Ok(window_entity) = window_query.single() else {
        return;
    };

    let cursor = if flags.map_draggable && editor.tool() != EditorTool::Hand {
        CursorIcon::System(SystemCursorIcon::Grab)
    } else {
        editor.tool().cursor_icon()
    };
    commands.entity(window_entity).insert(cursor);
}
