//! Match scoring. A pluggable, trait-based scorer that measures a résumé against
//! a job description's keywords.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, deterministic, fully testable).
//!
//! The match score is the share of keywords found in the document, 0 – 100.
//! It is independent of the general quality score the analysis backend returns.

use serde::{Deserialize, Serialize};

use crate::models::analysis::Keyword;
use crate::models::resume::ResumeDocument;
use crate::scoring::text::{document_text, normalize};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_score: u32, // 0 – 100
    /// Input keywords, in input order, with `found_in_resume` resolved.
    pub keywords: Vec<Keyword>,
    pub missing: Vec<String>,
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap matching strategies without touching the session or
/// handler code. Carried in `AppState` as `Arc<dyn MatchScorer>`.
///
/// Implementations must be total and deterministic: every keyword yields
/// exactly one boolean, and the same input always yields the same report.
pub trait MatchScorer: Send + Sync {
    fn score(&self, document: &ResumeDocument, keywords: &[Keyword]) -> MatchReport;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer (default)
// ────────────────────────────────────────────────────────────────────────────

/// Case-insensitive substring matcher over the document's normalized text.
///
/// Algorithm:
/// 1. Extract document text, strip `**` emphasis, lowercase, collapse spaces
/// 2. A keyword is found when its normalized term is a substring
/// 3. match_score = round(found / total × 100), 0 when there are no keywords
pub struct KeywordMatchScorer;

impl MatchScorer for KeywordMatchScorer {
    fn score(&self, document: &ResumeDocument, keywords: &[Keyword]) -> MatchReport {
        let haystack = normalize(&document_text(document));
        compute_keyword_match(&haystack, keywords)
    }
}

fn compute_keyword_match(haystack: &str, keywords: &[Keyword]) -> MatchReport {
    let annotated: Vec<Keyword> = keywords
        .iter()
        .map(|kw| Keyword {
            found_in_resume: term_matches(haystack, &kw.term),
            ..kw.clone()
        })
        .collect();

    let matched = annotated.iter().filter(|k| k.found_in_resume).count();
    let match_score = match_score(matched, annotated.len());

    let missing: Vec<String> = annotated
        .iter()
        .filter(|k| !k.found_in_resume)
        .map(|k| k.term.clone())
        .collect();

    let recommendation = build_recommendation(match_score, annotated.len(), &missing);

    MatchReport {
        match_score,
        keywords: annotated,
        missing,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

fn term_matches(haystack: &str, term: &str) -> bool {
    let needle = normalize(term);
    !needle.is_empty() && haystack.contains(&needle)
}

/// `round(matched / total × 100)`; 0 when `total` is 0.
pub fn match_score(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round() as u32
}

/// Builds a human-readable recommendation string from score and missing terms.
fn build_recommendation(score: u32, total: usize, missing: &[String]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if total == 0 {
        "No keywords to match, cannot score this job description.".to_string()
    } else if missing.is_empty() {
        "Every job description keyword appears in your résumé.".to_string()
    } else if score >= 60 {
        format!(
            "Good match ({score}/100). Consider working in: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Weak match ({score}/100). Missing keywords: {}.",
            top_missing.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
