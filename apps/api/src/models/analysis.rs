use serde::{Deserialize, Serialize};

use crate::models::resume::new_id;
use crate::models::suggestion::Suggestion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    #[default]
    Skill,
    Methodology,
    Tool,
    SoftSkill,
}

/// A job-description term and whether the résumé mentions it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub category: KeywordCategory,
    #[serde(default, alias = "foundInResume")]
    pub found_in_resume: bool,
}

impl Keyword {
    pub fn new(term: impl Into<String>, category: KeywordCategory) -> Self {
        Self {
            term: term.into(),
            frequency: 0,
            category,
            found_in_resume: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(default = "new_id")]
    pub id: String,
    pub raw_text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub extracted_keywords: Vec<Keyword>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Output of the AI suggestion collaborator.
///
/// `score` is the general quality score. `match_score` and `keywords` are
/// optional; when the collaborator leaves matching unresolved the local scorer
/// fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "matchScore")]
    pub match_score: Option<u32>,
    #[serde(default)]
    pub keywords: Option<Vec<Keyword>>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}
