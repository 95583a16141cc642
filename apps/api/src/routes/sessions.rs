use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionSummary;
use crate::state::AppState;
use crate::templates::TemplateId;
use crate::wizard::Stage;

#[derive(Deserialize)]
pub struct TemplateSelection {
    /// Unknown ids fall back to Classic.
    pub template_id: TemplateId,
}

#[derive(Deserialize)]
pub struct ResumeNameUpdate {
    pub resume_name: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    let summary = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state.sessions.read(id, |s| s.summary(id)).await?;
    Ok(Json(summary))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state
        .sessions
        .update(id, |s| {
            s.reset();
            Ok(s.summary(id))
        })
        .await?;
    info!(session_id = %id, "Session reset to defaults");
    Ok(Json(summary))
}

/// PUT /api/v1/sessions/:id/template
/// Picking a template from the gallery restarts the wizard at Personal Info.
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateSelection>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state
        .sessions
        .update(id, |s| {
            s.store.set_selected_template(req.template_id);
            s.wizard.go_to(Stage::Personal, &s.store);
            Ok(s.summary(id))
        })
        .await?;
    info!(session_id = %id, template = req.template_id.info().name, "Template selected");
    Ok(Json(summary))
}

/// PUT /api/v1/sessions/:id/name
pub async fn handle_set_resume_name(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResumeNameUpdate>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state
        .sessions
        .update(id, |s| {
            s.store.set_resume_name(req.resume_name);
            Ok(s.summary(id))
        })
        .await?;
    Ok(Json(summary))
}
