use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::editor::history::HistoryStack;
use crate::editor::mutations;
use crate::editor::EditError;
use crate::models::resume::{MetadataField, ResumeDocument, Section};

/// Owns the current snapshot and its undo/redo history.
///
/// Every edit follows the same protocol: compute the next snapshot from the
/// current one, push the pre-edit snapshot, clear redo, install the next
/// snapshot and stamp it. An edit that does not resolve, or that would leave
/// the document unchanged, records nothing.
#[derive(Debug, Clone, Default)]
pub struct DocumentEditor {
    current: Option<Arc<ResumeDocument>>,
    history: HistoryStack,
}

impl DocumentEditor {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            current: None,
            history: HistoryStack::with_limit(limit),
        }
    }

    pub fn document(&self) -> Option<&ResumeDocument> {
        self.current.as_deref()
    }

    /// Cheap shared handle to the current snapshot.
    pub fn snapshot(&self) -> Option<Arc<ResumeDocument>> {
        self.current.clone()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ── whole-document ──────────────────────────────────────────────────────

    /// Installs a whole document. The previous one, if any, becomes undoable.
    pub fn set_document(&mut self, document: ResumeDocument) {
        match self.current.replace(Arc::new(document)) {
            Some(previous) => self.history.push(previous),
            None => self.history.clear_redo(),
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.take_for_undo() else {
            return false;
        };
        if let Some(replaced) = self.current.replace(previous) {
            self.history.push_redo(replaced);
        }
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.take_for_redo() else {
            return false;
        };
        if let Some(replaced) = self.current.replace(next) {
            self.history.push_without_clearing(replaced);
        }
        true
    }

    // ── edits ───────────────────────────────────────────────────────────────

    pub fn update_metadata_field(&mut self, field: MetadataField, value: Option<String>) -> bool {
        self.apply("update_metadata_field", |doc| {
            mutations::update_metadata_field(doc, field, value)
        })
    }

    pub fn update_bullet_text(
        &mut self,
        section_id: &str,
        item_id: &str,
        bullet_id: &str,
        text: &str,
    ) -> bool {
        self.apply("update_bullet_text", |doc| {
            mutations::update_bullet_text(doc, section_id, item_id, bullet_id, text)
        })
    }

    /// Returns the new bullet's id when the edit committed.
    pub fn add_bullet(&mut self, section_id: &str, item_id: &str, text: &str) -> Option<String> {
        let mut bullet_id = None;
        let committed = self.apply("add_bullet", |doc| {
            let (next, id) = mutations::add_bullet(doc, section_id, item_id, text)?;
            bullet_id = Some(id);
            Some(next)
        });
        bullet_id.filter(|_| committed)
    }

    pub fn remove_bullet(&mut self, section_id: &str, item_id: &str, bullet_id: &str) -> bool {
        self.apply("remove_bullet", |doc| {
            mutations::remove_bullet(doc, section_id, item_id, bullet_id)
        })
    }

    pub fn remove_section_item(&mut self, section_id: &str, item_id: &str) -> bool {
        self.apply("remove_section_item", |doc| {
            mutations::remove_section_item(doc, section_id, item_id)
        })
    }

    pub fn update_summary_text(&mut self, section_id: &str, item_id: &str, text: &str) -> bool {
        self.apply("update_summary_text", |doc| {
            mutations::update_summary_text(doc, section_id, item_id, text)
        })
    }

    pub fn add_skill(
        &mut self,
        section_id: &str,
        item_id: Option<&str>,
        category: Option<&str>,
        skill: &str,
    ) -> bool {
        self.apply("add_skill", |doc| {
            mutations::add_skill(doc, section_id, item_id, category, skill)
        })
    }

    pub fn add_section(&mut self, section: Section) -> bool {
        self.apply("add_section", |doc| mutations::add_section(doc, section))
    }

    pub fn remove_section(&mut self, section_id: &str) -> bool {
        self.apply("remove_section", |doc| {
            mutations::remove_section(doc, section_id)
        })
    }

    pub fn update_section_title(&mut self, section_id: &str, title: &str) -> bool {
        self.apply("update_section_title", |doc| {
            mutations::update_section_title(doc, section_id, title)
        })
    }

    /// Rejects anything but a full permutation of the current section ids;
    /// a rejected request leaves document and history untouched.
    pub fn reorder_sections(&mut self, ordered_ids: &[String]) -> Result<bool, EditError> {
        let Some(current) = self.current.as_deref() else {
            return Ok(false);
        };
        let next = mutations::reorder_sections(current, ordered_ids)?;
        Ok(self.commit("reorder_sections", next))
    }

    // ── protocol ────────────────────────────────────────────────────────────

    fn apply<F>(&mut self, op: &'static str, edit: F) -> bool
    where
        F: FnOnce(&ResumeDocument) -> Option<ResumeDocument>,
    {
        let Some(current) = self.current.as_deref() else {
            debug!("{op}: no document loaded");
            return false;
        };
        match edit(current) {
            Some(next) => self.commit(op, next),
            None => {
                debug!("{op}: target did not resolve");
                false
            }
        }
    }

    fn commit(&mut self, op: &'static str, mut next: ResumeDocument) -> bool {
        let Some(current) = self.current.as_deref() else {
            return false;
        };
        if next == *current {
            debug!("{op}: no change");
            return false;
        }
        next.version = current.version.saturating_add(1);
        next.updated_at = Utc::now();

        if let Some(previous) = self.current.replace(Arc::new(next)) {
            self.history.push(previous);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionType;
    use crate::testing::{sample_document, section};

    fn loaded() -> DocumentEditor {
        let mut editor = DocumentEditor::new();
        editor.set_document(sample_document());
        editor
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_edits_without_document_are_noops() {
        let mut editor = DocumentEditor::new();
        assert!(!editor.update_bullet_text("exp", "job1", "b1", "x"));
        assert!(editor.add_bullet("exp", "job1", "x").is_none());
        assert_eq!(editor.reorder_sections(&ids(&["exp"])), Ok(false));
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert!(editor.document().is_none());
    }

    #[test]
    fn test_first_set_document_has_no_history() {
        let editor = loaded();
        assert!(!editor.can_undo());
        assert_eq!(editor.history_depth(), 0);
    }

    #[test]
    fn test_set_document_pushes_previous() {
        let mut editor = loaded();
        let mut other = sample_document();
        other.id = "doc-2".to_string();
        editor.set_document(other);

        assert_eq!(editor.history_depth(), 1);
        assert!(editor.undo());
        assert_eq!(editor.document().unwrap().id, "doc-1");
    }

    #[test]
    fn test_n_edits_then_n_undos_restores_original() {
        let mut editor = loaded();
        let original = editor.document().unwrap().clone();

        assert!(editor.update_bullet_text("exp", "job1", "b1", "Led a team of 5"));
        assert!(editor.add_bullet("exp", "job1", "Mentored juniors").is_some());
        assert!(editor.remove_section("summary"));
        assert!(editor.update_metadata_field(MetadataField::Phone, Some("555".to_string())));
        assert!(editor.reorder_sections(&ids(&["skills", "exp"])).unwrap());
        assert_eq!(editor.history_depth(), 5);

        for _ in 0..5 {
            assert!(editor.undo());
        }
        assert_eq!(editor.document().unwrap(), &original);
        assert!(!editor.undo());
    }

    #[test]
    fn test_undo_then_redo_is_identity() {
        let mut editor = loaded();
        editor.update_bullet_text("exp", "job1", "b1", "Led a team of 5");
        let edited = editor.document().unwrap().clone();

        assert!(editor.undo());
        assert!(editor.redo());
        assert_eq!(editor.document().unwrap(), &edited);
        assert_eq!(editor.history_depth(), 1);
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_redo_replays_in_edit_order() {
        let mut editor = loaded();
        editor.update_bullet_text("exp", "job1", "b1", "First");
        let after_first = editor.document().unwrap().clone();
        editor.update_bullet_text("exp", "job1", "b1", "Second");
        let after_second = editor.document().unwrap().clone();

        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.redo_depth(), 2);

        assert!(editor.redo());
        assert_eq!(editor.document().unwrap(), &after_first);
        assert_eq!(editor.redo_depth(), 1);

        assert!(editor.redo());
        assert_eq!(editor.document().unwrap(), &after_second);
        assert_eq!(editor.redo_depth(), 0);
        assert!(!editor.redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut editor = loaded();
        editor.update_bullet_text("exp", "job1", "b1", "First");
        editor.undo();
        assert!(editor.can_redo());

        editor.update_bullet_text("exp", "job1", "b2", "Second");
        assert!(!editor.can_redo());
        let before = editor.document().unwrap().clone();
        assert!(!editor.redo());
        assert_eq!(editor.document().unwrap(), &before);
    }

    #[test]
    fn test_add_then_remove_bullet_grows_history_by_two() {
        let mut editor = loaded();
        let before: Vec<String> = editor
            .document()
            .unwrap()
            .item("exp", "job1")
            .unwrap()
            .content
            .ordered_bullets()
            .iter()
            .map(|b| b.text.clone())
            .collect();

        let id = editor.add_bullet("exp", "job1", "Temporary").unwrap();
        assert!(editor.remove_bullet("exp", "job1", &id));

        let after: Vec<String> = editor
            .document()
            .unwrap()
            .item("exp", "job1")
            .unwrap()
            .content
            .ordered_bullets()
            .iter()
            .map(|b| b.text.clone())
            .collect();
        assert_eq!(before, after);
        assert_eq!(editor.history_depth(), 2);
    }

    #[test]
    fn test_unresolved_edit_records_nothing() {
        let mut editor = loaded();
        let before = editor.document().unwrap().clone();

        assert!(!editor.remove_bullet("exp", "job1", "ghost"));
        assert!(!editor.remove_section("ghost"));
        assert!(!editor.update_metadata_field(MetadataField::Name, None));
        assert_eq!(editor.history_depth(), 0);
        assert_eq!(editor.document().unwrap(), &before);
    }

    #[test]
    fn test_unchanged_edit_records_nothing() {
        let mut editor = loaded();
        assert!(!editor.update_bullet_text("exp", "job1", "b1", "Led team"));
        assert!(!editor.reorder_sections(&ids(&["exp", "skills", "summary"])).unwrap());
        assert_eq!(editor.history_depth(), 0);
    }

    #[test]
    fn test_reorder_sections_scenario() {
        let mut editor = DocumentEditor::new();
        let mut doc = sample_document();
        doc.sections = vec![
            Arc::new(section("a", SectionType::Summary, 0, vec![])),
            Arc::new(section("b", SectionType::Experience, 1, vec![])),
            Arc::new(section("c", SectionType::Skills, 2, vec![])),
        ];
        editor.set_document(doc);

        assert!(editor.reorder_sections(&ids(&["b", "a", "c"])).unwrap());
        let doc = editor.document().unwrap();
        assert_eq!(doc.section("b").unwrap().order, 0);
        assert_eq!(doc.section("a").unwrap().order, 1);
        assert_eq!(doc.section("c").unwrap().order, 2);
    }

    #[test]
    fn test_rejected_reorder_leaves_history_untouched() {
        let mut editor = loaded();
        assert!(editor.reorder_sections(&ids(&["exp"])).is_err());
        assert_eq!(editor.history_depth(), 0);
    }

    #[test]
    fn test_commit_bumps_version_and_updated_at() {
        let mut editor = loaded();
        let before = editor.document().unwrap().clone();
        editor.update_section_title("exp", "Work History");
        let after = editor.document().unwrap();
        assert_eq!(after.version, before.version + 1);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }
}
