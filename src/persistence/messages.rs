//! Message types for editor state persistence.

use bevy::prelude::*;

/// Write the current editor state to the state file
#[derive(Message)]
pub struct SaveStateRequest;

/// Return the editor to its initial state and delete the state file
#[derive(Message)]
pub struct ResetStateRequest;
