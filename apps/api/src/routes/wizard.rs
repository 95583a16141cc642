use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::{RowKey, Stage, StageForm, Transition, Wizard};

#[derive(Debug, Serialize)]
pub struct WizardView {
    pub stage: Stage,
    pub label: &'static str,
    pub draft: StageForm,
}

impl From<&Wizard> for WizardView {
    fn from(wizard: &Wizard) -> Self {
        Self {
            stage: wizard.stage(),
            label: wizard.stage().label(),
            draft: wizard.draft().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddedRow {
    pub key: RowKey,
    pub wizard: WizardView,
}

#[derive(Debug, Serialize)]
pub struct SubmitOutcome {
    #[serde(flatten)]
    pub transition: Transition,
    pub wizard: WizardView,
}

/// GET /api/v1/sessions/:id/wizard
pub async fn handle_get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state.sessions.read(id, |s| WizardView::from(&s.wizard)).await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/wizard/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<StageForm>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| {
            s.wizard.update_draft(form)?;
            Ok(WizardView::from(&s.wizard))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/wizard/rows
pub async fn handle_add_row(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<AddedRow>), AppError> {
    let added = state
        .sessions
        .update(id, |s| {
            let key = s.wizard.add_row()?;
            Ok(AddedRow {
                key,
                wizard: WizardView::from(&s.wizard),
            })
        })
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// DELETE /api/v1/sessions/:id/wizard/rows/:key
pub async fn handle_remove_row(
    State(state): State<AppState>,
    Path((id, key)): Path<(Uuid, String)>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| {
            s.wizard.remove_row(&key)?;
            Ok(WizardView::from(&s.wizard))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/wizard/submit
/// A rejected form is kept as the draft and reported field by field (422).
pub async fn handle_submit_stage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<StageForm>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let outcome = state
        .sessions
        .update(id, |s| {
            let transition = s.wizard.submit(&mut s.store, form)?;
            Ok(SubmitOutcome {
                transition,
                wizard: WizardView::from(&s.wizard),
            })
        })
        .await?;
    debug!(session_id = %id, stage = ?outcome.wizard.stage, "Stage submitted");
    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/wizard/back
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| {
            s.wizard.back(&s.store)?;
            Ok(WizardView::from(&s.wizard))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/wizard/stage/:stage
pub async fn handle_go_to_stage(
    State(state): State<AppState>,
    Path((id, stage)): Path<(Uuid, Stage)>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .update(id, |s| {
            s.wizard.go_to(stage, &s.store);
            Ok(WizardView::from(&s.wizard))
        })
        .await?;
    Ok(Json(view))
}
