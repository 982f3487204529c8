//! Unit tests for the history module.

use std::sync::Arc;

use crate::editor::{EditorTool, FeatureEditor};
use crate::geojson::{Feature, FeatureCollection, Geometry};

use super::command_history::CommandHistory;
use super::entry::HistoryEntry;

fn named(names: &[&str]) -> FeatureCollection {
    FeatureCollection::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Feature::new(Geometry::point([i as f64, -(i as f64)])).with_property("name", *name)
            })
            .collect(),
    )
}

fn selection_entry(indexes: Vec<usize>) -> HistoryEntry {
    HistoryEntry::Selection {
        selected_feature_indexes: indexes,
    }
}

// CommandHistory tests
#[test]
fn test_command_history_push() {
    let mut history = CommandHistory::default();
    assert!(!history.can_undo());

    history.push(selection_entry(vec![]));
    assert!(history.can_undo());
    assert_eq!(history.undo_count(), 1);
}

#[test]
fn test_command_history_push_clears_redo() {
    let mut history = CommandHistory::default();
    history.push(selection_entry(vec![]));
    history.push(selection_entry(vec![0]));

    let entry = history.pop_undo().unwrap();
    history.push_redo(entry);
    assert!(history.can_redo());

    history.push(selection_entry(vec![1]));
    assert!(!history.can_redo());
}

#[test]
fn test_command_history_is_unbounded() {
    let mut history = CommandHistory::default();
    for i in 0..500 {
        history.push(selection_entry(vec![i]));
    }
    assert_eq!(history.undo_count(), 500);
}

#[test]
fn test_push_undo_keeps_redo() {
    let mut history = CommandHistory::default();
    history.push_redo(selection_entry(vec![]));
    history.push_undo(selection_entry(vec![0]));
    assert_eq!(history.redo_count(), 1);
}

#[test]
fn test_undo_descriptions_most_recent_first() {
    let mut history = CommandHistory::default();
    history.push(selection_entry(vec![]));
    history.push(HistoryEntry::FeatureCollection {
        collection: Arc::new(FeatureCollection::default()),
        selected_feature_indexes: None,
    });
    let descriptions: Vec<_> = history.undo_descriptions().collect();
    assert_eq!(descriptions, ["Edit features", "Change selection"]);
}

#[test]
fn test_history_entry_serialization_tags() {
    let value = serde_json::to_value(selection_entry(vec![1, 2])).unwrap();
    assert_eq!(value["type"], "selection");
    assert_eq!(value["selectedFeatureIndexes"], serde_json::json!([1, 2]));

    let reorder = HistoryEntry::Reordering {
        collection: Arc::new(FeatureCollection::default()),
        selected_feature_indexes: vec![0],
    };
    let value = serde_json::to_value(&reorder).unwrap();
    assert_eq!(value["type"], "reordering");
    assert_eq!(value["collection"]["type"], "FeatureCollection");
}

// Editor undo/redo tests
#[test]
fn test_undo_redo_on_empty_stacks_are_noops() {
    let mut editor = FeatureEditor::new();
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert_eq!(editor.snapshot(), FeatureEditor::new().snapshot());
}

#[test]
fn test_n_replacements_then_n_undos_restore_content() {
    let original = named(&["a", "b"]);
    let mut editor = FeatureEditor::new();
    editor.replace_collection(original.clone());

    let n = 5;
    for i in 0..n {
        let names: Vec<String> = (0..=i).map(|j| format!("edit-{}", j)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        editor.replace_collection(named(&refs));
    }
    for _ in 0..n {
        assert!(editor.undo());
    }

    assert!(editor.collection().same_content(&original));
}

#[test]
fn test_undo_collection_clips_stale_selection() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a"]));
    editor.replace_collection(named(&["a", "b", "c"]));
    assert_eq!(editor.selection(), &[2]);

    editor.undo();

    assert_eq!(editor.collection().len(), 1);
    assert!(editor.selection().is_empty());
}

#[test]
fn test_undo_collection_keeps_valid_positions() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b"]));
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![2, 0, 1]);
    // Drop the selection entry so the collection entry is next
    let _ = editor.history.pop_undo();

    editor.undo();

    assert_eq!(editor.selection(), &[0, 1]);
}

#[test]
fn test_undo_selection_forces_select_tool() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b"]));
    editor.set_selection(vec![0]);
    editor.set_tool(EditorTool::Polygon);

    editor.undo();

    assert_eq!(editor.selection(), &[1]);
    assert_eq!(editor.tool(), EditorTool::Select);
}

#[test]
fn test_undo_then_redo_reproduces_selection_and_tool() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![0, 2]);
    let selection = editor.selection().to_vec();
    let tool = editor.tool();

    editor.undo();
    editor.redo();

    assert_eq!(editor.selection(), selection.as_slice());
    assert_eq!(editor.tool(), tool);
}

#[test]
fn test_undo_then_redo_collection_restores_clipped_selection() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b"]));
    assert_eq!(editor.selection(), &[1]);

    editor.undo();
    assert!(editor.collection().is_empty());
    assert!(editor.selection().is_empty());

    editor.redo();
    assert_eq!(editor.collection().len(), 2);
    assert_eq!(editor.selection(), &[1]);

    editor.undo();
    assert!(editor.selection().is_empty());
}

#[test]
fn test_collection_entry_omits_selection_until_undone() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a"]));
    let recorded = serde_json::to_value(editor.history.undo_entries().last().unwrap()).unwrap();
    assert!(recorded.get("selectedFeatureIndexes").is_none());

    editor.undo();
    let reverse = serde_json::to_value(editor.history.redo_entries().last().unwrap()).unwrap();
    assert_eq!(reverse["type"], "featureCollection");
    assert_eq!(reverse["selectedFeatureIndexes"], serde_json::json!([0]));
}

#[test]
fn test_undo_then_redo_reproduces_reordering_exactly() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![0]);
    editor.bring_to_front();
    let after = editor.snapshot();

    editor.undo();
    editor.redo();

    assert_eq!(editor.collection(), &*after.feature_collection);
    assert_eq!(editor.selection(), after.selected_feature_indexes.as_slice());
}

#[test]
fn test_undo_reordering_restores_order_and_selection_together() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![1]);
    let before = editor.collection_arc();

    editor.send_to_back();
    editor.undo();

    assert_eq!(editor.collection(), &*before);
    assert_eq!(editor.selection(), &[1]);
}

#[test]
fn test_delete_then_undo_recovers_original() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["A", "B", "C"]));
    let original = editor.collection_arc();
    editor.set_selection(vec![0, 2]);

    editor.delete_selected();
    assert_eq!(editor.collection().len(), 1);
    assert!(editor.collection().features[0].same_content(&original.features[1]));
    assert_ne!(editor.collection().features[0].id, original.features[1].id);

    editor.undo();
    assert_eq!(editor.collection(), &*original);
}

#[test]
fn test_redo_stack_empty_after_each_committed_mutation() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![1]);

    let mutations: [fn(&mut FeatureEditor); 4] = [
        |e| e.replace_collection(named(&["x", "y", "z"])),
        |e| {
            e.set_selection(vec![0]);
        },
        |e| {
            e.send_backward();
        },
        |e| e.delete_selected(),
    ];

    for mutate in mutations {
        editor.undo();
        assert!(editor.history().can_redo());
        mutate(&mut editor);
        assert_eq!(editor.redo_count(), 0);
    }
}

#[test]
fn test_redo_pushes_onto_undo_without_clearing_redo() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a"]));
    editor.replace_collection(named(&["a", "b"]));
    editor.undo();
    editor.undo();
    assert_eq!(editor.redo_count(), 2);

    editor.redo();

    assert_eq!(editor.redo_count(), 1);
    assert_eq!(editor.undo_count(), 1);
    assert_eq!(editor.collection().len(), 1);
}

#[test]
fn test_interleaved_history_unwinds_to_empty() {
    let mut editor = FeatureEditor::new();
    editor.replace_collection(named(&["a", "b", "c"]));
    editor.set_selection(vec![0]);
    editor.bring_to_front();
    editor.set_selection(vec![1]);
    editor.delete_selected();
    editor.set_selection(vec![]);

    while editor.undo() {}

    assert!(editor.collection().is_empty());
    assert!(editor.selection().is_empty());
    assert_eq!(editor.redo_count(), 6);

    while editor.redo() {}

    assert_eq!(editor.collection().len(), 2);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.undo_count(), 6);
}
