use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::export::PdfExporter;
use crate::scoring::MatchScorer;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub config: Config,
    /// `LlmAnalyzer` when an API key is configured, `DisabledAnalyzer` otherwise.
    pub analyzer: Arc<dyn Analyzer>,
    /// `None` when no render service is configured; export answers 501.
    pub exporter: Option<Arc<dyn PdfExporter>>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
}
