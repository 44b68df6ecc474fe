//! Analysis collaborator. Asks the model for suggestions, a quality score and
//! job-description keywords, then reconciles its answer with local scoring.
//!
//! `AppState` holds an `Arc<dyn Analyzer>`: `LlmAnalyzer` when an API key is
//! configured, `DisabledAnalyzer` otherwise.

pub mod prompts;

use async_trait::async_trait;
use tracing::info;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{ID_FIDELITY_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ResumeDocument;
use crate::scoring::MatchScorer;

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        resume: &ResumeDocument,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl Analyzer for LlmAnalyzer {
    async fn analyze(
        &self,
        resume: &ResumeDocument,
        job_description: &str,
    ) -> Result<AnalysisResult, AppError> {
        let prompt = build_analysis_prompt(resume, job_description)?;
        let system = format!("{ANALYSIS_SYSTEM} {ID_FIDELITY_INSTRUCTION} {JSON_ONLY_SYSTEM}");

        let result: AnalysisResult = self
            .0
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Résumé analysis failed: {e}")))?;

        info!(
            "Analysis returned score {} with {} suggestions",
            result.score,
            result.suggestions.len()
        );
        Ok(result)
    }
}

fn build_analysis_prompt(resume: &ResumeDocument, job_description: &str) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize résumé: {e}")))?;
    Ok(ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_json}", &resume_json)
        .replace("{job_description}", job_description))
}

// ────────────────────────────────────────────────────────────────────────────
// DisabledAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Stand-in used when no model credentials are configured.
pub struct DisabledAnalyzer;

#[async_trait]
impl Analyzer for DisabledAnalyzer {
    async fn analyze(&self, _: &ResumeDocument, _: &str) -> Result<AnalysisResult, AppError> {
        Err(AppError::Unavailable(
            "Analysis is disabled: ANTHROPIC_API_KEY is not set".to_string(),
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reconciliation
// ────────────────────────────────────────────────────────────────────────────

/// Fills in keyword matching the collaborator left unresolved.
///
/// When the result carries keywords but no `match_score`, every keyword's
/// `found_in_resume` is computed locally and `match_score` is set from it. A
/// supplied `match_score` is trusted as-is, keywords included.
pub fn reconcile(
    mut result: AnalysisResult,
    resume: &ResumeDocument,
    scorer: &dyn MatchScorer,
) -> AnalysisResult {
    if result.match_score.is_some() {
        return result;
    }
    if let Some(keywords) = result.keywords.take() {
        let report = scorer.score(resume, &keywords);
        result.match_score = Some(report.match_score);
        result.keywords = Some(report.keywords);
    }
    result
}
