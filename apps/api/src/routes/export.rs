use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{content_disposition, ExportError, ExportStatus, ExportedFile};
use crate::render::{render, PageLayout};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PageLayout>, AppError> {
    let layout = state.sessions.read(id, |s| render(s.store.document())).await?;
    Ok(Json(layout))
}

/// GET /api/v1/sessions/:id/export/status
pub async fn handle_export_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExportStatus>, AppError> {
    let status = state.sessions.read(id, |s| s.export_status.clone()).await?;
    Ok(Json(status))
}

/// POST /api/v1/sessions/:id/export
///
/// Renders the committed document, snapshots it and returns the PDF. Only one
/// export per session may be in flight; the session lock is not held while the
/// snapshot runs.
///
/// Once started, the export runs to completion in its own task and records the
/// final status even if the client goes away before the response is sent.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (layout, resume_name) = state
        .sessions
        .update(id, |s| {
            if s.export_status == ExportStatus::InProgress {
                return Err(AppError::Conflict("An export is already in progress".to_string()));
            }
            s.export_status = ExportStatus::InProgress;
            Ok((render(s.store.document()), s.store.resume_name().to_string()))
        })
        .await?;
    info!(
        session_id = %id,
        template = ?layout.template,
        pixel_ratio = state.exporter.pixel_ratio(),
        "Export started"
    );

    let task = tokio::spawn(run_export(state.clone(), id, layout, resume_name));
    let file = match task.await {
        Ok(result) => result?,
        Err(e) => {
            record_status(
                &state,
                id,
                ExportStatus::Failed {
                    reason: "export task aborted".to_string(),
                },
            )
            .await;
            return Err(anyhow::anyhow!("export task failed: {e}").into());
        }
    };

    let disposition = HeaderValue::from_str(&content_disposition(&file.filename))
        .map_err(|e| anyhow::anyhow!("invalid Content-Disposition value: {e}"))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

async fn run_export(
    state: AppState,
    id: Uuid,
    layout: PageLayout,
    resume_name: String,
) -> Result<ExportedFile, ExportError> {
    let result = state.exporter.export(&layout, &resume_name).await;
    let status = match &result {
        Ok(file) => ExportStatus::Succeeded {
            filename: file.filename.clone(),
        },
        Err(e) => ExportStatus::Failed {
            reason: e.to_string(),
        },
    };
    record_status(&state, id, status).await;
    result
}

/// The session may have been deleted meanwhile; that is not an error here.
async fn record_status(state: &AppState, id: Uuid, status: ExportStatus) {
    let _ = state
        .sessions
        .update(id, |s| {
            s.export_status = status;
            Ok(())
        })
        .await;
}
