//! Load, autosave, save polling and reset systems.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::EditorConfig;
use crate::editor::{DraftEdit, FeatureEditor, ViewState};

use super::messages::{ResetStateRequest, SaveStateRequest};
use super::resources::{PersistenceStatus, SaveStateTask};
use super::results::SaveResult;
use super::storage::{
    StoredState, back_up_corrupt, encode_state, read_state, remove_state, write_state,
};

/// Startup system restoring the last saved editor state.
///
/// An unusable state file is moved aside and the editor starts empty.
pub fn load_state_system(
    config: Res<EditorConfig>,
    mut editor: ResMut<FeatureEditor>,
    mut view: ResMut<ViewState>,
    mut status: ResMut<PersistenceStatus>,
) {
    let path = config.state_path();
    match read_state(&path) {
        Ok(Some(stored)) => {
            *editor = FeatureEditor::from_snapshot(stored.editor);
            *view = stored.view;
            info!(
                "Restored {} features and {} undo steps from {:?}",
                editor.collection().len(),
                editor.undo_count(),
                path
            );
        }
        Ok(None) => {
            info!("No saved state at {:?}, starting empty", path);
        }
        Err(e) if e.is_corrupt() => {
            warn!("Saved state at {:?} is unusable: {}", path, e);
            match back_up_corrupt(&path) {
                Ok(backup) => info!("Moved unusable state to {:?}", backup),
                Err(backup_err) => error!("Failed to back up unusable state: {}", backup_err),
            }
            status.last_error = Some(format!("Saved state was discarded: {}", e));
        }
        Err(e) => {
            error!("Failed to read saved state: {}", e);
            status.last_error = Some(format!("Could not read saved state: {}", e));
        }
    }
}

/// Request a save whenever committed state or the view changes.
pub fn autosave_system(
    editor: Res<FeatureEditor>,
    view: Res<ViewState>,
    config: Res<EditorConfig>,
    mut status: ResMut<PersistenceStatus>,
    mut save_events: MessageWriter<SaveStateRequest>,
) {
    if !editor.is_changed() && !view.is_changed() {
        return;
    }
    if status.suppress_autosave {
        status.suppress_autosave = false;
        return;
    }
    if config.data.autosave {
        save_events.write(SaveStateRequest);
    }
}

/// Starts an async save operation
pub fn save_state_system(
    mut commands: Commands,
    mut events: MessageReader<SaveStateRequest>,
    editor: Res<FeatureEditor>,
    view: Res<ViewState>,
    config: Res<EditorConfig>,
    mut status: ResMut<PersistenceStatus>,
) {
    // Several requests in one frame save once
    if events.read().count() == 0 {
        return;
    }

    // Don't start a new save if one is already in progress
    if status.is_saving {
        status.save_pending = true;
        return;
    }

    let stored = StoredState {
        editor: editor.snapshot(),
        view: *view,
    };
    let encoded = match encode_state(&stored) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!("Failed to serialize editor state: {}", e);
            status.last_error = Some(format!("Failed to serialize editor state: {}", e));
            return;
        }
    };

    status.is_saving = true;
    let path = config.state_path();

    // Spawn async task for file I/O
    let task_pool = IoTaskPool::get();
    let task = task_pool.spawn(async move {
        let error = write_state(&path, &encoded).err().map(|e| e.to_string());
        SaveResult { path, error }
    });

    commands.spawn(SaveStateTask(task));
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveStateTask)>,
    mut status: ResMut<PersistenceStatus>,
    mut save_events: MessageWriter<SaveStateRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        status.is_saving = false;

        if status.stale_save {
            // Reset happened mid-write; the file just written is outdated
            status.stale_save = false;
            if let Err(e) = remove_state(&result.path) {
                warn!("Failed to remove state written before reset: {}", e);
            }
        } else {
            match result.error {
                None => {
                    debug!("Editor state saved to {:?}", result.path);
                    status.last_error = None;
                    status.last_saved = Some(chrono::Local::now());
                }
                Some(e) => {
                    error!("Failed to save editor state: {}", e);
                    status.last_error = Some(e);
                }
            }
        }

        if status.save_pending {
            status.save_pending = false;
            save_events.write(SaveStateRequest);
        }
    }
}

/// Return the editor to its initial state and delete the state file.
pub fn reset_state_system(
    mut events: MessageReader<ResetStateRequest>,
    config: Res<EditorConfig>,
    mut editor: ResMut<FeatureEditor>,
    mut view: ResMut<ViewState>,
    mut draft: ResMut<DraftEdit>,
    mut status: ResMut<PersistenceStatus>,
) {
    if events.read().count() == 0 {
        return;
    }

    draft.discard();
    editor.reset();
    *view = ViewState::default();

    status.suppress_autosave = true;
    status.save_pending = false;
    status.stale_save = status.is_saving;
    status.last_saved = None;

    let path = config.state_path();
    match remove_state(&path) {
        Ok(true) => info!("Deleted saved state at {:?}", path),
        Ok(false) => {}
        Err(e) => {
            error!("Failed to delete saved state: {}", e);
            status.last_error = Some(format!("Failed to delete saved state: {}", e));
        }
    }
}
