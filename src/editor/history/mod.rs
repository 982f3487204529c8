//! Undo/Redo system for editor actions.
//!
//! Every committed edit (collection replacement, selection change, reordering)
//! pushes one [`HistoryEntry`] holding the state it displaced and clears the
//! redo stack. Undo and redo swap an entry's state back in and push the
//! displaced state onto the opposite stack under the same tag.
//!
//! ## Module Structure
//!
//! - [`entry`] - HistoryEntry enum defining all reversible state changes
//! - [`command_history`] - CommandHistory undo/redo stacks
//! - [`execute`] - `FeatureEditor::undo` / `FeatureEditor::redo`

mod command_history;
mod entry;
mod execute;

#[cfg(test)]
mod tests;

pub use command_history::CommandHistory;
pub use entry::HistoryEntry;
