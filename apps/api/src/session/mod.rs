//! Editing sessions.
//!
//! An `EditingSession` owns one document with its undo/redo history, the
//! suggestions of its last analysis and the analysis bookkeeping. Sessions
//! live in the `SessionStore` and are reached by id from the HTTP layer.

pub mod handlers;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis;
use crate::editor::DocumentEditor;
use crate::models::analysis::{AnalysisResult, JobDescription, Keyword};
use crate::models::resume::{ParseResult, ResumeDocument};
use crate::models::suggestion::Suggestion;
use crate::scoring::{MatchReport, MatchScorer};
use crate::suggestions::{applier, Dispatch, ReviewError, ReviewTally, SuggestionQueue};

pub use store::SessionStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has no document loaded")]
    NoDocument,

    #[error("an analysis is already running for this session")]
    AnalysisInFlight,

    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Scores and keywords of the last installed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub document_id: String,
    pub score: u32,
    pub summary: Option<String>,
    pub match_score: Option<u32>,
    pub keywords: Vec<Keyword>,
    pub analyzed_at: DateTime<Utc>,
}

/// Handed out by `begin_analysis`; identifies the run and the document it
/// ran on.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub run: u64,
    pub document_id: String,
    pub snapshot: Arc<ResumeDocument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    Installed,
    /// The document was replaced while the analysis ran; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Approval {
    pub suggestion_id: String,
    pub dispatch: Dispatch,
    pub mutated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMove {
    Next,
    Previous,
}

#[derive(Debug)]
pub struct EditingSession {
    pub id: Uuid,
    pub editor: DocumentEditor,
    pub suggestions: SuggestionQueue,
    pub warnings: Vec<String>,
    analysis: Option<AnalysisSummary>,
    last_match: Option<MatchReport>,
    /// Run number of the analysis currently in flight.
    running: Option<u64>,
    runs: u64,
    created_at: DateTime<Utc>,
}

impl EditingSession {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            id: Uuid::new_v4(),
            editor: DocumentEditor::with_history_limit(history_limit),
            suggestions: SuggestionQueue::default(),
            warnings: Vec::new(),
            analysis: None,
            last_match: None,
            running: None,
            runs: 0,
            created_at: Utc::now(),
        }
    }

    /// A fresh session holding the parsed document. Parser warnings are kept
    /// verbatim for display.
    pub fn from_parse_result(parse: ParseResult, history_limit: Option<usize>) -> Self {
        let mut session = Self::new(history_limit);
        session.editor.set_document(parse.resume);
        session.warnings = parse.warnings;
        session
    }

    pub fn document(&self) -> Option<&ResumeDocument> {
        self.editor.document()
    }

    pub fn analysis(&self) -> Option<&AnalysisSummary> {
        self.analysis.as_ref()
    }

    pub fn last_match(&self) -> Option<&MatchReport> {
        self.last_match.as_ref()
    }

    pub fn is_analysis_in_flight(&self) -> bool {
        self.running.is_some()
    }

    /// Replaces the document. Suggestions and analysis tied to a different
    /// document id are discarded with it.
    pub fn replace_document(&mut self, document: ResumeDocument) {
        let same_document = self.document().map(|d| d.id == document.id).unwrap_or(false);
        self.editor.set_document(document);
        if !same_document {
            self.suggestions.replace(Vec::new());
            self.analysis = None;
            self.last_match = None;
        }
    }

    // ── review ──────────────────────────────────────────────────────────────

    /// Applies a pending suggestion to the document and marks it accepted.
    ///
    /// A suggestion whose coordinates do not resolve is still accepted; the
    /// document is left as it was.
    pub fn approve(&mut self, suggestion_id: &str) -> Result<Approval, SessionError> {
        let suggestion = self.suggestions.pending_by_id(suggestion_id)?.clone();
        let (dispatch, mutated) = applier::apply(&mut self.editor, &suggestion);
        self.suggestions.mark_accepted(suggestion_id)?;
        info!(
            "Session {}: accepted suggestion {} (mutated: {mutated})",
            self.id, suggestion_id
        );
        Ok(Approval {
            suggestion_id: suggestion_id.to_string(),
            dispatch,
            mutated,
        })
    }

    pub fn discard(&mut self, suggestion_id: &str) -> Result<(), SessionError> {
        self.suggestions.mark_dismissed(suggestion_id)?;
        info!("Session {}: dismissed suggestion {}", self.id, suggestion_id);
        Ok(())
    }

    pub fn move_cursor(&mut self, movement: CursorMove) -> Option<&Suggestion> {
        match movement {
            CursorMove::Next => self.suggestions.next(),
            CursorMove::Previous => self.suggestions.previous(),
        }
    }

    // ── analysis ────────────────────────────────────────────────────────────

    /// Marks an analysis as running and returns the snapshot to analyze.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        if self.running.is_some() {
            return Err(SessionError::AnalysisInFlight);
        }
        let snapshot = self.editor.snapshot().ok_or(SessionError::NoDocument)?;
        self.runs += 1;
        self.running = Some(self.runs);
        Ok(AnalysisTicket {
            run: self.runs,
            document_id: snapshot.id.clone(),
            snapshot,
        })
    }

    /// Releases the in-flight slot after a failed or abandoned run. Nothing
    /// else changes. A run that is no longer the current one is ignored.
    pub fn abort_analysis(&mut self, run: u64) {
        self.release_run(run);
    }

    fn release_run(&mut self, run: u64) {
        if self.running == Some(run) {
            self.running = None;
        }
    }

    /// Installs an analysis result unless the document it was computed for has
    /// since been replaced. Keyword matching the result left unresolved is
    /// computed against the current document.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: AnalysisResult,
        scorer: &dyn MatchScorer,
    ) -> InstallOutcome {
        self.release_run(ticket.run);

        let Some(current) = self.editor.snapshot() else {
            warn!("Session {}: dropping analysis, document was removed", self.id);
            return InstallOutcome::Stale;
        };
        if current.id != ticket.document_id {
            warn!(
                "Session {}: dropping stale analysis for document {} (current: {})",
                self.id, ticket.document_id, current.id
            );
            return InstallOutcome::Stale;
        }

        let result = analysis::reconcile(result, &current, scorer);
        info!(
            "Session {}: installed analysis (score {}, {} suggestions)",
            self.id,
            result.score,
            result.suggestions.len()
        );
        self.analysis = Some(AnalysisSummary {
            document_id: ticket.document_id,
            score: result.score,
            summary: result.summary,
            match_score: result.match_score,
            keywords: result.keywords.unwrap_or_default(),
            analyzed_at: Utc::now(),
        });
        self.suggestions.replace(result.suggestions);
        InstallOutcome::Installed
    }

    // ── matching ────────────────────────────────────────────────────────────

    /// Scores the current document against a job description's keyword
    /// inventory and keeps the report as the session's latest match.
    pub fn match_job(
        &mut self,
        job: &JobDescription,
        scorer: &dyn MatchScorer,
    ) -> Result<MatchReport, SessionError> {
        let document = self.editor.document().ok_or(SessionError::NoDocument)?;
        let report = scorer.score(document, &job.keyword_inventory());
        self.last_match = Some(report.clone());
        Ok(report)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            document: self.editor.snapshot(),
            warnings: self.warnings.clone(),
            suggestions: self.suggestions.all().to_vec(),
            current_suggestion_id: self.suggestions.current().map(|s| s.id.clone()),
            review: self.suggestions.tally(),
            can_undo: self.editor.can_undo(),
            can_redo: self.editor.can_redo(),
            history_depth: self.editor.history_depth(),
            redo_depth: self.editor.redo_depth(),
            analysis: self.analysis().cloned(),
            last_match: self.last_match().cloned(),
            analysis_in_flight: self.is_analysis_in_flight(),
            created_at: self.created_at,
        }
    }
}

/// Serializable snapshot of a session for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub document: Option<Arc<ResumeDocument>>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub current_suggestion_id: Option<String>,
    pub review: ReviewTally,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_depth: usize,
    pub redo_depth: usize,
    pub analysis: Option<AnalysisSummary>,
    pub last_match: Option<MatchReport>,
    pub analysis_in_flight: bool,
    pub created_at: DateTime<Utc>,
}
