pub mod catalog;
pub mod export;
pub mod health;
pub mod sessions;
pub mod wizard;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Gallery and static pages
        .route("/api/v1/templates", get(catalog::handle_list_templates))
        .route(
            "/api/v1/templates/:id/thumbnail",
            get(catalog::handle_template_thumbnail),
        )
        .route("/api/v1/years", get(catalog::handle_year_options))
        .route("/api/v1/about", get(catalog::handle_about))
        .route("/api/v1/resumes", get(catalog::handle_list_resumes))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(sessions::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(sessions::handle_select_template),
        )
        .route(
            "/api/v1/sessions/:id/name",
            put(sessions::handle_set_resume_name),
        )
        // Wizard
        .route("/api/v1/sessions/:id/wizard", get(wizard::handle_get_wizard))
        .route(
            "/api/v1/sessions/:id/wizard/draft",
            put(wizard::handle_update_draft),
        )
        .route(
            "/api/v1/sessions/:id/wizard/rows",
            post(wizard::handle_add_row),
        )
        .route(
            "/api/v1/sessions/:id/wizard/rows/:key",
            delete(wizard::handle_remove_row),
        )
        .route(
            "/api/v1/sessions/:id/wizard/submit",
            post(wizard::handle_submit_stage),
        )
        .route(
            "/api/v1/sessions/:id/wizard/back",
            post(wizard::handle_back),
        )
        .route(
            "/api/v1/sessions/:id/wizard/stage/:stage",
            post(wizard::handle_go_to_stage),
        )
        // Preview and export
        .route("/api/v1/sessions/:id/preview", get(export::handle_preview))
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .route(
            "/api/v1/sessions/:id/export/status",
            get(export::handle_export_status),
        )
        .with_state(state)
}
