use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Collaborator settings are optional; the matching feature is switched off when
/// one is missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables the LLM analyzer.
    pub anthropic_api_key: Option<String>,
    /// Enables PDF export.
    pub render_service_url: Option<String>,
    /// Max undo entries per session. Unlimited when unset.
    pub history_limit: Option<usize>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            render_service_url: optional_env("RENDER_SERVICE_URL"),
            history_limit: optional_env("HISTORY_LIMIT")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("HISTORY_LIMIT must be a non-negative integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank variables both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    /// Everything optional left unset.
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: None,
            render_service_url: None,
            history_limit: None,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
