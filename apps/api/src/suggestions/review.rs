use serde::Serialize;
use thiserror::Error;

use crate::models::suggestion::{ReviewState, Suggestion};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("suggestion '{0}' not found")]
    NotFound(String),

    #[error("suggestion '{id}' was already {state:?}")]
    AlreadyDecided { id: String, state: ReviewState },
}

/// Review counters for the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewTally {
    pub pending: usize,
    pub accepted: usize,
    pub dismissed: usize,
}

/// Suggestions from the last analysis plus a cursor over the pending subset.
///
/// Accepted and dismissed are terminal. The cursor is re-clamped every time
/// the pending subset shrinks so it never points past the end.
#[derive(Debug, Clone, Default)]
pub struct SuggestionQueue {
    suggestions: Vec<Suggestion>,
    cursor: usize,
}

impl SuggestionQueue {
    #[cfg(test)]
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self {
            suggestions,
            cursor: 0,
        }
    }

    /// Replaces the whole collection (a fresh analysis) and rewinds the cursor.
    pub fn replace(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.cursor = 0;
    }

    pub fn all(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn get(&self, id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    pub fn pending(&self) -> Vec<&Suggestion> {
        self.suggestions.iter().filter(|s| s.is_pending()).collect()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The pending suggestion under the cursor.
    pub fn current(&self) -> Option<&Suggestion> {
        self.pending().get(self.cursor).copied()
    }

    pub fn next(&mut self) -> Option<&Suggestion> {
        let len = self.pending().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Suggestion> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn tally(&self) -> ReviewTally {
        self.suggestions
            .iter()
            .fold(ReviewTally::default(), |mut tally, s| {
                match s.state() {
                    ReviewState::Pending => tally.pending += 1,
                    ReviewState::Accepted => tally.accepted += 1,
                    ReviewState::Dismissed => tally.dismissed += 1,
                }
                tally
            })
    }

    /// Looks up a suggestion that is still pending.
    pub fn pending_by_id(&self, id: &str) -> Result<&Suggestion, ReviewError> {
        let suggestion = self
            .get(id)
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;
        match suggestion.state() {
            ReviewState::Pending => Ok(suggestion),
            state => Err(ReviewError::AlreadyDecided {
                id: id.to_string(),
                state,
            }),
        }
    }

    pub fn mark_accepted(&mut self, id: &str) -> Result<(), ReviewError> {
        self.decide(id, ReviewState::Accepted)
    }

    pub fn mark_dismissed(&mut self, id: &str) -> Result<(), ReviewError> {
        self.decide(id, ReviewState::Dismissed)
    }

    fn decide(&mut self, id: &str, outcome: ReviewState) -> Result<(), ReviewError> {
        self.pending_by_id(id)?;
        if let Some(suggestion) = self.suggestions.iter_mut().find(|s| s.id == id) {
            match outcome {
                ReviewState::Accepted => suggestion.is_accepted = true,
                ReviewState::Dismissed => suggestion.is_dismissed = true,
                ReviewState::Pending => {}
            }
        }
        self.clamp_cursor();
        Ok(())
    }

    fn clamp_cursor(&mut self) {
        let len = self.pending().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::{SuggestionAction, SuggestionType};

    fn pending(id: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            action: SuggestionAction::Rewrite,
            suggestion_type: SuggestionType::Stylistic,
            section_id: None,
            item_id: None,
            bullet_id: None,
            field: None,
            title: format!("Suggestion {id}"),
            description: String::new(),
            current_text: None,
            suggested_text: None,
            impact: "Low".to_string(),
            score_impact: 1,
            is_accepted: false,
            is_dismissed: false,
        }
    }

    fn queue(ids: &[&str]) -> SuggestionQueue {
        SuggestionQueue::new(ids.iter().map(|id| pending(id)).collect())
    }

    #[test]
    fn test_accept_and_dismiss_are_terminal() {
        let mut q = queue(&["a", "b"]);
        q.mark_accepted("a").unwrap();
        q.mark_dismissed("b").unwrap();

        assert_eq!(
            q.mark_dismissed("a"),
            Err(ReviewError::AlreadyDecided {
                id: "a".to_string(),
                state: ReviewState::Accepted
            })
        );
        assert!(q.mark_accepted("b").is_err());
        assert_eq!(q.get("a").unwrap().state(), ReviewState::Accepted);
        assert_eq!(q.get("b").unwrap().state(), ReviewState::Dismissed);
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        let mut q = queue(&["a"]);
        q.mark_dismissed("a").unwrap();
        let a = q.get("a").unwrap();
        assert!(a.is_dismissed && !a.is_accepted);
    }

    #[test]
    fn test_unknown_id() {
        let mut q = queue(&["a"]);
        assert_eq!(
            q.mark_accepted("zzz"),
            Err(ReviewError::NotFound("zzz".to_string()))
        );
    }

    #[test]
    fn test_cursor_reclamps_when_last_pending_is_decided() {
        let mut q = queue(&["a", "b", "c"]);
        q.next();
        q.next();
        assert_eq!(q.current().unwrap().id, "c");

        q.mark_accepted("c").unwrap();
        assert_eq!(q.cursor(), 1);
        assert_eq!(q.current().unwrap().id, "b");

        q.mark_dismissed("b").unwrap();
        q.mark_dismissed("a").unwrap();
        assert_eq!(q.cursor(), 0);
        assert!(q.current().is_none());
    }

    #[test]
    fn test_cursor_stays_in_bounds_while_navigating() {
        let mut q = queue(&["a", "b"]);
        assert_eq!(q.previous().unwrap().id, "a");
        assert_eq!(q.next().unwrap().id, "b");
        assert_eq!(q.next().unwrap().id, "b");
    }

    #[test]
    fn test_deciding_middle_suggestion_advances_to_following_one() {
        let mut q = queue(&["a", "b", "c"]);
        q.next();
        q.mark_accepted("b").unwrap();
        assert_eq!(q.current().unwrap().id, "c");
    }

    #[test]
    fn test_tally_and_replace() {
        let mut q = queue(&["a", "b", "c"]);
        q.mark_accepted("a").unwrap();
        q.mark_dismissed("b").unwrap();
        assert_eq!(
            q.tally(),
            ReviewTally {
                pending: 1,
                accepted: 1,
                dismissed: 1
            }
        );

        q.replace(vec![pending("d")]);
        assert_eq!(q.cursor(), 0);
        assert_eq!(q.pending().len(), 1);
    }
}
