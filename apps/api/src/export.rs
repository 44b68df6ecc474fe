//! PDF export through the external rendering service.
//!
//! The service owns LaTeX/PDF rendering; this side only ships the full
//! snapshot and hands back the bytes it gets, uninterpreted.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{ExportRequest, ResumeDocument};

#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn export(&self, resume: &ResumeDocument) -> Result<Bytes, AppError>;
}

pub struct HttpPdfExporter {
    client: Client,
    endpoint: String,
}

impl HttpPdfExporter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PdfExporter for HttpPdfExporter {
    async fn export(&self, resume: &ResumeDocument) -> Result<Bytes, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ExportRequest { resume })
            .send()
            .await
            .map_err(|e| AppError::Export(format!("request to renderer failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!("renderer returned {status}: {body}")));
        }

        let pdf = response
            .bytes()
            .await
            .map_err(|e| AppError::Export(format!("reading renderer response failed: {e}")))?;
        info!("Exported résumé {} ({} bytes)", resume.id, pdf.len());
        Ok(pdf)
    }
}
