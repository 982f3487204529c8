//! Editor state persistence.
//!
//! The committed editor state (collection, selection, tool, both history
//! stacks) and the map view are written to a single JSON state file whenever
//! they change, and restored on startup.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for save and reset
//! - [`resources`] - Save status and the save task component
//! - [`results`] - Result types for async operations
//! - [`storage`] - State file layout, encoding and file operations
//! - [`systems`] - Load, autosave, save polling and reset systems

mod messages;
mod resources;
mod results;
mod storage;
mod systems;

#[cfg(test)]
mod tests;

pub use messages::{ResetStateRequest, SaveStateRequest};
pub use resources::PersistenceStatus;

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::editor::EditorMutations;

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PersistenceStatus>()
            .add_message::<SaveStateRequest>()
            .add_message::<ResetStateRequest>()
            .add_systems(Startup, systems::load_state_system.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    systems::reset_state_system.run_if(on_message::<ResetStateRequest>),
                    systems::autosave_system,
                    systems::save_state_system,
                    systems::poll_save_tasks,
                )
                    .chain()
                    .after(EditorMutations),
            );
    }
}
