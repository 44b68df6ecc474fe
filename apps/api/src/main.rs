mod analysis;
mod config;
mod editor;
mod errors;
mod export;
mod llm_client;
mod models;
mod routes;
mod scoring;
mod session;
mod state;
mod suggestions;

#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{Analyzer, DisabledAnalyzer, LlmAnalyzer};
use crate::config::Config;
use crate::export::{HttpPdfExporter, PdfExporter};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::KeywordMatchScorer;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Analysis collaborator
    let analyzer: Arc<dyn Analyzer> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM analyzer initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmAnalyzer(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; analysis is disabled");
            Arc::new(DisabledAnalyzer)
        }
    };

    // Export collaborator
    let exporter: Option<Arc<dyn PdfExporter>> = match &config.render_service_url {
        Some(url) => {
            info!("PDF export via {url}");
            Some(Arc::new(HttpPdfExporter::new(url.clone())))
        }
        None => {
            warn!("RENDER_SERVICE_URL not set; export is disabled");
            None
        }
    };

    if let Some(limit) = config.history_limit {
        info!("Undo history capped at {limit} entries per session");
    }

    let state = AppState {
        sessions: SessionStore::new(),
        config: config.clone(),
        analyzer,
        exporter,
        match_scorer: Arc::new(KeywordMatchScorer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
