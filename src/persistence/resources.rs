//! Resource types for persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use chrono::{DateTime, Local};

use super::results::SaveResult;

/// Resource tracking the state file's save status for display to user.
#[derive(Resource, Default)]
pub struct PersistenceStatus {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// A save was requested while another was in progress
    pub save_pending: bool,
    /// The state was reset while a save was in progress; its file must go
    pub stale_save: bool,
    /// Skip the next autosave (set by reset so the deleted file stays deleted)
    pub suppress_autosave: bool,
    pub last_error: Option<String>,
    pub last_saved: Option<DateTime<Local>>,
}

/// Component for save task
#[derive(Component)]
pub struct SaveStateTask(pub Task<SaveResult>);
