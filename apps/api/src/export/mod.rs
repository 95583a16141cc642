//! Export pipeline: snapshot a rendered page and wrap it in a one-page PDF.
//!
//! 1. `Snapshotter::capture` rasterizes the layout at `pixel_ratio` (2× by default).
//! 2. `pdf::assemble` embeds the image to fill a 595×842 page.
//!
//! Both steps are CPU-bound and run on blocking threads. Failures come back as
//! `ExportError` so the caller can report them instead of silently resetting.

pub mod pdf;
pub mod raster;

use std::sync::Arc;

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::render::PageLayout;
pub use raster::{LayoutRasterizer, Snapshotter};

const DEFAULT_FILE_STEM: &str = "resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("raster capture failed: {0}")]
    Capture(String),

    #[error("document assembly failed: {0}")]
    Assembly(String),
}

/// A finished download.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Bytes,
    pub page_width_pt: i64,
    pub page_height_pt: i64,
    pub image_width_px: u32,
    pub image_height_px: u32,
}

/// Per-session download indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded {
        filename: String,
    },
    Failed {
        reason: String,
    },
}

#[derive(Clone)]
pub struct ExportPipeline {
    snapshotter: Arc<dyn Snapshotter>,
    pixel_ratio: u32,
}

impl ExportPipeline {
    pub fn new(snapshotter: Arc<dyn Snapshotter>, pixel_ratio: u32) -> Self {
        Self {
            snapshotter,
            pixel_ratio,
        }
    }

    pub fn pixel_ratio(&self) -> u32 {
        self.pixel_ratio
    }

    pub async fn export(&self, layout: &PageLayout, resume_name: &str) -> Result<ExportedFile, ExportError> {
        let filename = export_filename(resume_name);

        let result = self.run(layout, &filename).await;
        match &result {
            Ok(file) => info!(
                filename = %file.filename,
                size_bytes = file.bytes.len(),
                "Resume exported"
            ),
            Err(e) => error!(filename = %filename, "Resume export failed: {e}"),
        }
        result
    }

    async fn run(&self, layout: &PageLayout, filename: &str) -> Result<ExportedFile, ExportError> {
        let image = self.snapshotter.capture(layout, self.pixel_ratio).await?;
        let (image_width_px, image_height_px) = image.dimensions();

        let title = filename.trim_end_matches(".pdf").to_string();
        let bytes = tokio::task::spawn_blocking(move || pdf::assemble(&image, &title))
            .await
            .map_err(|e| ExportError::Assembly(format!("assembly task failed: {e}")))??;

        Ok(ExportedFile {
            filename: filename.to_string(),
            bytes: Bytes::from(bytes),
            page_width_pt: pdf::PDF_PAGE_WIDTH_PT,
            page_height_pt: pdf::PDF_PAGE_HEIGHT_PT,
            image_width_px,
            image_height_px,
        })
    }
}

/// `"{name}.pdf"`, or `"resume.pdf"` for a blank name.
pub fn export_filename(resume_name: &str) -> String {
    let stem = resume_name.trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    format!("{stem}.pdf")
}

/// RFC 5987 `attr-char` complement: everything else is percent-encoded.
const ATTR_CHAR_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// `attachment` header value with characters unsafe in file names replaced.
///
/// The quoted `filename` is always ASCII; names with other characters also get
/// a UTF-8 `filename*` parameter (RFC 6266).
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if safe.is_ascii() {
        return format!("attachment; filename=\"{safe}\"");
    }
    let fallback: String = safe.chars().map(|c| if c.is_ascii() { c } else { '_' }).collect();
    let encoded = utf8_percent_encode(&safe, ATTR_CHAR_ESCAPES);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::RgbImage;

    use crate::models::{EducationEntry, ResumeDocument, WorkExperienceEntry};
    use crate::render::render;

    struct FailingSnapshotter;

    #[async_trait]
    impl Snapshotter for FailingSnapshotter {
        async fn capture(&self, _layout: &PageLayout, _pixel_ratio: u32) -> Result<RgbImage, ExportError> {
            Err(ExportError::Capture("canvas unavailable".to_string()))
        }
    }

    fn jane_doe() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal_info.first_name = "Jane".into();
        doc.personal_info.last_name = "Doe".into();
        doc.work_experience = vec![WorkExperienceEntry {
            id: "1".into(),
            job_title: "Engineer".into(),
            organization: "Acme".into(),
            start_year: "2020".into(),
            end_year: "Present".into(),
        }];
        doc.education = vec![EducationEntry {
            id: "1".into(),
            degree: "BSc".into(),
            institution: "State U".into(),
            start_year: "2016".into(),
            end_year: "2020".into(),
        }];
        doc.skills = vec!["Go".into(), "Testing".into()];
        doc.resume_name = "JaneResume".into();
        doc
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("JaneResume"), "JaneResume.pdf");
        assert_eq!(export_filename(""), "resume.pdf");
        assert_eq!(export_filename("   "), "resume.pdf");
        assert_eq!(export_filename("My Resume"), "My Resume.pdf");
    }

    #[test]
    fn test_content_disposition_sanitizes() {
        assert_eq!(
            content_disposition("a/b\"c.pdf"),
            "attachment; filename=\"a_b_c.pdf\""
        );
        assert_eq!(
            content_disposition("JaneResume.pdf"),
            "attachment; filename=\"JaneResume.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_non_ascii_name() {
        let value = content_disposition("Zoë Résumé.pdf");
        assert!(value.is_ascii());
        assert_eq!(
            value,
            "attachment; filename=\"Zo_ R_sum_.pdf\"; filename*=UTF-8''Zo%C3%AB%20R%C3%A9sum%C3%A9.pdf"
        );
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }

    #[tokio::test]
    async fn test_export_produces_named_single_page_pdf() {
        let doc = jane_doe();
        let pipeline = ExportPipeline::new(Arc::new(LayoutRasterizer), 2);
        let file = pipeline.export(&render(&doc), &doc.resume_name).await.unwrap();

        assert_eq!(file.filename, "JaneResume.pdf");
        assert_eq!((file.page_width_pt, file.page_height_pt), (595, 842));
        assert_eq!((file.image_width_px, file.image_height_px), (1190, 1684));

        let pdf = lopdf::Document::load_mem(&file.bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_capture_failure_is_reported() {
        let pipeline = ExportPipeline::new(Arc::new(FailingSnapshotter), 2);
        let err = pipeline
            .export(&render(&jane_doe()), "JaneResume")
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Capture(_)));
        assert!(err.to_string().contains("canvas unavailable"));
    }
}
