//! Keyboard shortcuts for tools, history, selection and z-order.

use bevy::prelude::*;

use super::draft::DraftEdit;
use super::reorder::ReorderDirection;
use super::state::FeatureEditor;
use super::tools::EditorTool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Tool(EditorTool),
    Undo,
    Redo,
    SelectAll,
    DeleteSelected,
    Reorder(ReorderDirection),
}

impl ShortcutAction {
    /// Whether the action leaves the collection, selection and history alone,
    /// so it can run while a drag draft is open.
    pub fn allowed_while_dragging(self) -> bool {
        matches!(self, ShortcutAction::Tool(_))
    }

    pub fn apply(self, editor: &mut FeatureEditor) {
        match self {
            ShortcutAction::Tool(tool) => editor.set_tool(tool),
            ShortcutAction::Undo => {
                editor.undo();
            }
            ShortcutAction::Redo => {
                editor.redo();
            }
            ShortcutAction::SelectAll => {
                editor.select_all();
            }
            ShortcutAction::DeleteSelected => editor.delete_selected(),
            ShortcutAction::Reorder(direction) => {
                editor.reorder(direction);
            }
        }
    }
}

/// Map this frame's key presses to an editor action. Ctrl and Cmd are
/// interchangeable.
pub fn shortcut_action(keyboard: &ButtonInput<KeyCode>) -> Option<ShortcutAction> {
    let ctrl = keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if ctrl {
        if keyboard.just_pressed(KeyCode::KeyZ) {
            return Some(if shift {
                ShortcutAction::Redo
            } else {
                ShortcutAction::Undo
            });
        }
        if keyboard.just_pressed(KeyCode::KeyY) {
            return Some(ShortcutAction::Redo);
        }
        if keyboard.just_pressed(KeyCode::KeyA) {
            return Some(ShortcutAction::SelectAll);
        }
        // Other modified keys belong to the host (copy, paste, ...)
        return None;
    }

    if keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        return Some(ShortcutAction::DeleteSelected);
    }
    if keyboard.just_pressed(KeyCode::BracketRight) {
        return Some(ShortcutAction::Reorder(if shift {
            ReorderDirection::BringToFront
        } else {
            ReorderDirection::BringForward
        }));
    }
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        return Some(ShortcutAction::Reorder(if shift {
            ReorderDirection::SendToBack
        } else {
            ReorderDirection::SendBackward
        }));
    }
    if keyboard.just_pressed(KeyCode::KeyO) {
        return Some(ShortcutAction::Tool(if shift {
            EditorTool::Ellipse
        } else {
            EditorTool::Circle
        }));
    }

    const TOOL_KEYS: [(KeyCode, EditorTool); 9] = [
        (KeyCode::KeyV, EditorTool::Select),
        (KeyCode::KeyE, EditorTool::Edit),
        (KeyCode::KeyH, EditorTool::Hand),
        (KeyCode::KeyG, EditorTool::Polygon),
        (KeyCode::KeyD, EditorTool::PolygonByDragging),
        (KeyCode::KeyL, EditorTool::Line),
        (KeyCode::KeyR, EditorTool::Rectangle),
        (KeyCode::KeyP, EditorTool::Pencil),
        (KeyCode::KeyM, EditorTool::Marker),
    ];
    TOOL_KEYS
        .iter()
        .find(|(key, _)| keyboard.just_pressed(*key))
        .map(|(_, tool)| ShortcutAction::Tool(*tool))
}

/// Like [`shortcut_action`], but drops actions that would edit committed
/// state underneath an open drag draft.
pub fn shortcut_for_frame(
    keyboard: &ButtonInput<KeyCode>,
    draft: &DraftEdit,
) -> Option<ShortcutAction> {
    let action = shortcut_action(keyboard)?;
    if draft.is_dragging() && !action.allowed_while_dragging() {
        debug!("Shortcut {:?} ignored during drag", action);
        return None;
    }
    Some(action)
}

pub fn handle_editor_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    draft: Res<DraftEdit>,
    mut editor: ResMut<FeatureEditor>,
) {
    if let Some(action) = shortcut_for_frame(&keyboard, &draft) {
        debug!("Shortcut: {:?}", action);
        action.apply(&mut editor);
    }
}
