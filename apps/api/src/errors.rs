use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::wizard::{ValidationErrors, WizardError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Invalid(errors) => AppError::Validation(errors),
            WizardError::NoRows(_) => AppError::BadRequest(err.to_string()),
            WizardError::RowNotFound(_) => AppError::NotFound(err.to_string()),
            WizardError::StageMismatch { .. } | WizardError::LastRow | WizardError::AtFirstStage(_) => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(errors) => {
                tracing::debug!(fields = ?errors.fields(), "Rejected submission");
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": errors.to_string(),
                        "fields": errors.errors,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unavailable(msg) => {
                tracing::warn!("Service unavailable: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg.clone())
            }
            AppError::Export(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPORT_FAILED",
                format!("Failed to generate the PDF: {e}"),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{validation, Stage};

    #[test]
    fn test_wizard_errors_map_to_statuses() {
        let cases = [
            (WizardError::NoRows(Stage::Personal), StatusCode::BAD_REQUEST),
            (WizardError::RowNotFound("x".into()), StatusCode::NOT_FOUND),
            (WizardError::LastRow, StatusCode::CONFLICT),
            (WizardError::AtFirstStage(Stage::Personal), StatusCode::CONFLICT),
            (
                WizardError::StageMismatch {
                    current: Stage::Work,
                    submitted: Stage::Skills,
                },
                StatusCode::CONFLICT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let errors = validation::validate_skills(&[]).unwrap_err();
        let response = AppError::from(WizardError::Invalid(errors)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["field"], "skills");
    }

    #[test]
    fn test_export_failure_is_500() {
        let err = AppError::from(ExportError::Capture("boom".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
