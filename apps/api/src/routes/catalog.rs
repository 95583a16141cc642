//! Read-only endpoints that need no session: the template gallery, year
//! picker options and the static pages.

use axum::{extract::Path, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::render::{render_thumbnail, PageLayout};
use crate::templates::{year_options, TemplateId, TemplateInfo, TEMPLATES};

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [TemplateInfo]> {
    Json(&TEMPLATES)
}

/// GET /api/v1/templates/:id/thumbnail
pub async fn handle_template_thumbnail(Path(id): Path<u32>) -> Result<Json<PageLayout>, AppError> {
    let template =
        TemplateId::from_index(id).ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))?;
    Ok(Json(render_thumbnail(template)))
}

/// GET /api/v1/years
pub async fn handle_year_options() -> Json<Vec<String>> {
    Json(year_options())
}

/// GET /api/v1/about
pub async fn handle_about() -> Json<Value> {
    Json(json!({
        "title": "About Resume Builder",
        "summary": "We help job seekers create professional, eye-catching resumes that get results. \
                    Our easy-to-use platform makes building your resume simple and stress-free.",
        "features": [
            {
                "title": "Professional Templates",
                "description": "Choose from our collection of professionally designed resume templates that stand out."
            },
            {
                "title": "Quick & Easy",
                "description": "Build your resume in minutes with our intuitive step-by-step form process."
            },
            {
                "title": "ATS Friendly",
                "description": "Our templates are optimized for Applicant Tracking Systems to help you get noticed."
            },
            {
                "title": "Privacy First",
                "description": "Your data is never persisted. Sessions live in memory only."
            }
        ],
        "mission": "We believe everyone deserves a chance to present themselves professionally."
    }))
}

#[derive(Serialize)]
pub struct SavedResume {
    pub name: String,
}

/// GET /api/v1/resumes
/// Saved resumes are not persisted, so the listing is always empty.
pub async fn handle_list_resumes() -> Json<Vec<SavedResume>> {
    Json(Vec::new())
}
