// Keyword / match scoring against a job description.
// No LLM calls: everything here is deterministic and runs on the caller's thread.

pub mod keywords;
pub mod matcher;
pub mod text;

pub use matcher::{KeywordMatchScorer, MatchReport, MatchScorer};
