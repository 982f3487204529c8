//! Undo and redo stacks.

use super::entry::HistoryEntry;

/// Stacks of entries that can be undone and redone (most recent last).
///
/// History is unbounded: every committed edit stays reachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandHistory {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

#[allow(dead_code)]
impl CommandHistory {
    /// Rebuild history from persisted stacks.
    pub fn from_stacks(undo_stack: Vec<HistoryEntry>, redo_stack: Vec<HistoryEntry>) -> Self {
        Self {
            undo_stack,
            redo_stack,
        }
    }

    /// Record a committed edit. Any redoable entries are discarded.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        self.undo_stack.push(entry);
    }

    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop()
    }

    /// Push the reverse of an undone entry
    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo_stack.push(entry);
    }

    /// Push the reverse of a redone entry, leaving the redo stack intact
    pub fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn redo_entries(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    /// Descriptions of undoable entries, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.undo_stack.iter().rev().map(HistoryEntry::description)
    }
}
