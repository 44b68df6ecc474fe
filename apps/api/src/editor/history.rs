use std::collections::VecDeque;
use std::sync::Arc;

use crate::models::resume::ResumeDocument;

/// Linear undo/redo storage of prior snapshots.
///
/// Snapshots share every untouched section and item with their neighbours, so
/// an entry costs roughly one copied path, not a whole document.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    undo: VecDeque<Arc<ResumeDocument>>,
    redo: Vec<Arc<ResumeDocument>>,
    limit: Option<usize>,
}

impl HistoryStack {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` undo entries, dropping the oldest first.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Records a pre-edit snapshot. A new edit invalidates every undone future.
    pub fn push(&mut self, entry: Arc<ResumeDocument>) {
        self.push_without_clearing(entry);
        self.redo.clear();
    }

    pub fn push_without_clearing(&mut self, entry: Arc<ResumeDocument>) {
        self.undo.push_back(entry);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }

    pub fn take_for_undo(&mut self) -> Option<Arc<ResumeDocument>> {
        self.undo.pop_back()
    }

    pub fn push_redo(&mut self, entry: Arc<ResumeDocument>) {
        self.redo.push(entry);
    }

    pub fn take_for_redo(&mut self) -> Option<Arc<ResumeDocument>> {
        self.redo.pop()
    }

    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }
}
