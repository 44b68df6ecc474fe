use serde::{Deserialize, Serialize};

use crate::models::resume::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    Rewrite,
    Add,
    Delete,
}

/// Accepts the backend's action aliases on input: `remove` is a delete and
/// `format` is a rewrite.
impl<'de> Deserialize<'de> for SuggestionAction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "rewrite" | "format" => Ok(SuggestionAction::Rewrite),
            "add" => Ok(SuggestionAction::Add),
            "delete" | "remove" => Ok(SuggestionAction::Delete),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["rewrite", "add", "delete", "remove", "format"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Critical,
    Stylistic,
    Formatting,
    Content,
    Enhancement,
}

/// Review state derived from the two wire flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Pending,
    Accepted,
    Dismissed,
}

fn default_impact() -> String {
    "Medium".to_string()
}

/// An externally generated edit proposal. Coordinates are interpreted per
/// action and section type when the suggestion is approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default = "new_id")]
    pub id: String,
    pub action: SuggestionAction,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub bullet_id: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub current_text: Option<String>,
    #[serde(default)]
    pub suggested_text: Option<String>,
    #[serde(default = "default_impact")]
    pub impact: String,
    #[serde(default)]
    pub score_impact: i32,
    #[serde(default, alias = "isAccepted")]
    pub is_accepted: bool,
    #[serde(default, alias = "isDismissed")]
    pub is_dismissed: bool,
}

impl Suggestion {
    pub fn state(&self) -> ReviewState {
        if self.is_accepted {
            ReviewState::Accepted
        } else if self.is_dismissed {
            ReviewState::Dismissed
        } else {
            ReviewState::Pending
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == ReviewState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_suggestion_defaults_to_pending() {
        let json = r#"{"type": "critical", "action": "rewrite", "title": "Quantify"}"#;
        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.state(), ReviewState::Pending);
        assert_eq!(s.impact, "Medium");
        assert_eq!(s.score_impact, 0);
        assert!(!s.id.is_empty());
    }

    #[test]
    fn test_remove_and_format_aliases() {
        let remove: Suggestion =
            serde_json::from_str(r#"{"type": "content", "action": "remove", "title": "t"}"#)
                .unwrap();
        assert_eq!(remove.action, SuggestionAction::Delete);

        let format: Suggestion =
            serde_json::from_str(r#"{"type": "formatting", "action": "format", "title": "t"}"#)
                .unwrap();
        assert_eq!(format.action, SuggestionAction::Rewrite);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<Suggestion, _> =
            serde_json::from_str(r#"{"type": "content", "action": "merge", "title": "t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_camel_case_review_flags_are_accepted() {
        let s: Suggestion = serde_json::from_str(
            r#"{"type": "stylistic", "action": "add", "title": "t", "isDismissed": true}"#,
        )
        .unwrap();
        assert_eq!(s.state(), ReviewState::Dismissed);
    }
}
