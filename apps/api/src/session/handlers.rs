//! Axum route handlers for the Session API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::JobDescription;
use crate::models::resume::{MetadataField, ParseResult, ResumeDocument, Section};
use crate::scoring::MatchReport;
use crate::session::store::SharedSession;
use crate::session::{Approval, CursorMove, EditingSession, InstallOutcome, SessionView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MetadataRequest {
    pub field: MetadataField,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub section_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    #[serde(default)]
    pub item_id: Option<String>,
    /// Category id or name. Defaults to the first category.
    #[serde(default)]
    pub category: Option<String>,
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CursorRequest {
    pub direction: CursorMove,
}

/// Result of any document edit: whether it changed the document, plus the
/// session as it now stands.
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub changed: bool,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct AddBulletResponse {
    pub bullet_id: Option<String>,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub approval: Approval,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub outcome: InstallOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub report: MatchReport,
}

async fn load(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

fn require_name(document: &ResumeDocument) -> Result<(), AppError> {
    if !document.metadata.has_name() {
        return Err(AppError::Validation("metadata.name cannot be empty".to_string()));
    }
    Ok(())
}

/// Runs one edit under the session lock and reports the outcome.
async fn edit<F>(state: &AppState, id: Uuid, op: F) -> Result<Json<EditResponse>, AppError>
where
    F: FnOnce(&mut EditingSession) -> Result<bool, AppError>,
{
    let shared = load(state, id).await?;
    let mut session = shared.lock().await;
    let changed = op(&mut *session)?;
    Ok(Json(EditResponse {
        changed,
        session: session.view(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Opens a session on a parse result. Parser warnings are passed through.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(parse): Json<ParseResult>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    require_name(&parse.resume)?;
    let session = EditingSession::from_parse_result(parse, state.config.history_limit);
    let view = session.view();
    let id = state.sessions.insert(session).await;
    tracing::info!("Created session {id} ({} live)", state.sessions.len().await);
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let shared = load(&state, id).await?;
    let session = shared.lock().await;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    tracing::info!("Ended session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/document
pub async fn handle_set_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(document): Json<ResumeDocument>,
) -> Result<Json<EditResponse>, AppError> {
    require_name(&document)?;
    edit(&state, id, |session| {
        session.replace_document(document);
        Ok(true)
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Document edits
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/metadata
pub async fn handle_update_metadata(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MetadataRequest>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session.editor.update_metadata_field(req.field, req.value))
    })
    .await
}

/// POST /api/v1/sessions/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(section): Json<Section>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| Ok(session.editor.add_section(section))).await
}

/// PATCH /api/v1/sessions/:id/sections/:section_id
pub async fn handle_update_section_title(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(req): Json<TitleRequest>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session.editor.update_section_title(&section_id, &req.title))
    })
    .await
}

/// DELETE /api/v1/sessions/:id/sections/:section_id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| Ok(session.editor.remove_section(&section_id))).await
}

/// PUT /api/v1/sessions/:id/sections/order
///
/// The body must list every current section id exactly once.
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session.editor.reorder_sections(&req.section_ids)?)
    })
    .await
}

/// POST /api/v1/sessions/:id/sections/:section_id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(req): Json<AddSkillRequest>,
) -> Result<Json<EditResponse>, AppError> {
    if req.skill.trim().is_empty() {
        return Err(AppError::Validation("skill cannot be empty".to_string()));
    }
    edit(&state, id, |session| {
        Ok(session.editor.add_skill(
            &section_id,
            req.item_id.as_deref(),
            req.category.as_deref(),
            &req.skill,
        ))
    })
    .await
}

/// DELETE /api/v1/sessions/:id/sections/:section_id/items/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, section_id, item_id)): Path<(Uuid, String, String)>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session.editor.remove_section_item(&section_id, &item_id))
    })
    .await
}

/// PUT /api/v1/sessions/:id/sections/:section_id/items/:item_id/summary
pub async fn handle_update_summary(
    State(state): State<AppState>,
    Path((id, section_id, item_id)): Path<(Uuid, String, String)>,
    Json(req): Json<TextRequest>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session
            .editor
            .update_summary_text(&section_id, &item_id, &req.text))
    })
    .await
}

/// POST /api/v1/sessions/:id/sections/:section_id/items/:item_id/bullets
pub async fn handle_add_bullet(
    State(state): State<AppState>,
    Path((id, section_id, item_id)): Path<(Uuid, String, String)>,
    Json(req): Json<TextRequest>,
) -> Result<Json<AddBulletResponse>, AppError> {
    let shared = load(&state, id).await?;
    let mut session = shared.lock().await;
    let bullet_id = session.editor.add_bullet(&section_id, &item_id, &req.text);
    Ok(Json(AddBulletResponse {
        bullet_id,
        session: session.view(),
    }))
}

/// PATCH /api/v1/sessions/:id/sections/:section_id/items/:item_id/bullets/:bullet_id
pub async fn handle_update_bullet(
    State(state): State<AppState>,
    Path((id, section_id, item_id, bullet_id)): Path<(Uuid, String, String, String)>,
    Json(req): Json<TextRequest>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session
            .editor
            .update_bullet_text(&section_id, &item_id, &bullet_id, &req.text))
    })
    .await
}

/// DELETE /api/v1/sessions/:id/sections/:section_id/items/:item_id/bullets/:bullet_id
pub async fn handle_remove_bullet(
    State(state): State<AppState>,
    Path((id, section_id, item_id, bullet_id)): Path<(Uuid, String, String, String)>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| {
        Ok(session
            .editor
            .remove_bullet(&section_id, &item_id, &bullet_id))
    })
    .await
}

/// POST /api/v1/sessions/:id/undo
pub async fn handle_undo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| Ok(session.editor.undo())).await
}

/// POST /api/v1/sessions/:id/redo
pub async fn handle_redo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditResponse>, AppError> {
    edit(&state, id, |session| Ok(session.editor.redo())).await
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions and analysis
// ────────────────────────────────────────────────────────────────────────────

/// Releases the session's analysis slot if the analyze request is dropped
/// before it gets to install or abort, e.g. when the client disconnects.
struct RunGuard {
    session: Option<SharedSession>,
    run: u64,
}

impl RunGuard {
    fn disarm(mut self) {
        self.session = None;
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let run = self.run;
        tracing::warn!("Analysis run {run} abandoned; releasing the session");
        tokio::spawn(async move {
            session.lock().await.abort_analysis(run);
        });
    }
}

/// POST /api/v1/sessions/:id/analyze
///
/// Runs the analyzer on a snapshot without holding the session lock. The
/// result is installed only if the session still holds the same document.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description cannot be empty".to_string()));
    }

    let shared = load(&state, id).await?;
    let ticket = shared.lock().await.begin_analysis()?;
    let guard = RunGuard {
        session: Some(shared.clone()),
        run: ticket.run,
    };

    let result = state
        .analyzer
        .analyze(&ticket.snapshot, &req.job_description)
        .await;

    let mut session = shared.lock().await;
    guard.disarm();
    let result = match result {
        Ok(result) => result,
        Err(e) => {
            session.abort_analysis(ticket.run);
            return Err(e);
        }
    };
    let outcome = session.finish_analysis(ticket, result, state.match_scorer.as_ref());

    Ok(Json(AnalyzeResponse {
        outcome,
        session: session.view(),
    }))
}

/// POST /api/v1/sessions/:id/suggestions/:suggestion_id/approve
pub async fn handle_approve(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
) -> Result<Json<ApprovalResponse>, AppError> {
    let shared = load(&state, id).await?;
    let mut session = shared.lock().await;
    let approval = session.approve(&suggestion_id)?;
    Ok(Json(ApprovalResponse {
        approval,
        session: session.view(),
    }))
}

/// POST /api/v1/sessions/:id/suggestions/:suggestion_id/discard
pub async fn handle_discard(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let shared = load(&state, id).await?;
    let mut session = shared.lock().await;
    session.discard(&suggestion_id)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/suggestions/cursor
pub async fn handle_move_cursor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CursorRequest>,
) -> Result<Json<SessionView>, AppError> {
    let shared = load(&state, id).await?;
    let mut session = shared.lock().await;
    session.move_cursor(req.direction);
    Ok(Json(session.view()))
}

// ────────────────────────────────────────────────────────────────────────────
// Matching and export
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/match
///
/// Scores the current document against a job description's keywords.
pub async fn handle_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(job): Json<JobDescription>,
) -> Result<Json<MatchResponse>, AppError> {
    let shared = load(&state, id).await?;
    let mut session = shared.lock().await;
    let report = session.match_job(&job, state.match_scorer.as_ref())?;
    Ok(Json(MatchResponse { report }))
}

/// GET /api/v1/sessions/:id/export
///
/// Sends the current snapshot to the render service and streams back its PDF.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let exporter = state.exporter.clone().ok_or(AppError::NotImplemented)?;
    let snapshot = load(&state, id)
        .await?
        .lock()
        .await
        .editor
        .snapshot()
        .ok_or_else(|| AppError::Validation("session has no document loaded".to_string()))?;

    let pdf = exporter.export(&snapshot).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"resume-{}.pdf\"", snapshot.id),
            ),
        ],
        pdf,
    ))
}
