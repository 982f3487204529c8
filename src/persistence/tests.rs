//! Unit tests for the persistence module.

use serde_json::{Value, json};

use crate::constants::{STORAGE_KEY, STORAGE_VERSION};
use crate::editor::{EditorTool, FeatureEditor, ViewState};
use crate::geojson::{Feature, FeatureCollection, Geometry};

use super::storage::{
    PersistenceError, StoredState, back_up_corrupt, decode_state, encode_state, read_state,
    remove_state, write_state,
};

fn edited_state() -> StoredState {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(FeatureCollection::new(vec![
        Feature::new(Geometry::point([0.0, 0.0])).with_property("name", "a"),
        Feature::new(Geometry::point([1.0, 2.0, 3.0])).with_property("name", "b"),
    ]));
    editor.set_selection(vec![0]);
    editor.bring_to_front();
    editor.undo();

    StoredState {
        editor: editor.snapshot(),
        view: ViewState {
            zoom: 7.5,
            bearing: 30.0,
            ..ViewState::default()
        },
    }
}

// Layout tests
#[test]
fn test_encoded_layout_is_namespaced_and_versioned() {
    let encoded = encode_state(&edited_state()).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    let entry = &value[STORAGE_KEY];
    assert_eq!(entry["version"], STORAGE_VERSION);
    assert_eq!(entry["state"]["featureCollection"]["type"], "FeatureCollection");
    assert_eq!(entry["state"]["tool"], "select");
    assert_eq!(entry["state"]["undoStack"].as_array().unwrap().len(), 2);
    assert_eq!(entry["state"]["redoStack"][0]["type"], "reordering");
    assert_eq!(entry["state"]["view"]["zoom"], 7.5);
}

#[test]
fn test_decode_restores_editor_and_view() {
    let state = edited_state();
    let decoded = decode_state(&encode_state(&state).unwrap()).unwrap();

    assert_eq!(decoded, state);

    let mut restored = FeatureEditor::from_snapshot(decoded.editor);
    assert_eq!(restored.redo_count(), 1);
    assert!(restored.redo());
    assert_eq!(
        restored.collection().features[1].properties["name"],
        "a"
    );
}

#[test]
fn test_decode_without_view_uses_default_view() {
    let text = json!({
        STORAGE_KEY: {
            "state": {
                "featureCollection": {"type": "FeatureCollection", "features": []},
                "tool": "pencil"
            },
            "version": 1
        }
    })
    .to_string();

    let decoded = decode_state(&text).unwrap();

    assert_eq!(decoded.view, ViewState::default());
    assert_eq!(decoded.editor.tool, EditorTool::Pencil);
    assert!(decoded.editor.undo_stack.is_empty());
}

#[test]
fn test_decode_rejects_missing_namespace() {
    let result = decode_state(r#"{"other.com": {"state": {}, "version": 1}}"#);
    assert!(matches!(result, Err(PersistenceError::MissingNamespace(_))));
}

#[test]
fn test_decode_rejects_other_versions() {
    let text = json!({ STORAGE_KEY: { "state": {}, "version": 2 } }).to_string();
    assert!(matches!(
        decode_state(&text),
        Err(PersistenceError::UnsupportedVersion(2))
    ));
}

#[test]
fn test_decode_rejects_malformed_json() {
    let err = decode_state("{ truncated").unwrap_err();
    assert!(matches!(err, PersistenceError::Json(_)));
    assert!(err.is_corrupt());
}

// File tests
#[test]
fn test_write_then_read_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    let state = edited_state();

    write_state(&path, &encode_state(&state).unwrap()).unwrap();

    assert_eq!(read_state(&path).unwrap(), Some(state));
    assert!(!dir.path().join("nested").join("state.json.tmp").exists());
}

#[test]
fn test_read_missing_state_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(read_state(&dir.path().join("state.json")).unwrap(), None);
}

#[test]
fn test_remove_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    write_state(&path, "{}").unwrap();

    assert!(remove_state(&path).unwrap());
    assert!(!path.exists());
    assert!(!remove_state(&path).unwrap());
}

#[test]
fn test_corrupt_state_file_is_backed_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json at all").unwrap();

    let err = read_state(&path).unwrap_err();
    assert!(err.is_corrupt());

    let backup = back_up_corrupt(&path).unwrap();
    assert_eq!(backup, dir.path().join("state.json.corrupt"));
    assert!(!path.exists());
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "not json at all");
}
