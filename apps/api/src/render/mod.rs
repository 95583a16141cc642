// Template Renderer: (document, template) -> positioned A4 page.
// Pure and synchronous; export snapshots the returned layout as-is.

pub mod font_metrics;
pub mod layout;
pub mod palette;
pub mod variants;
pub mod view;

pub use layout::{Node, PageLayout, TextRole, PAGE_MIN_HEIGHT_PT, PAGE_WIDTH_PT};
pub use palette::{Color, Palette};
pub use view::{EntryRow, ResumeView};

use crate::models::{EducationEntry, PersonalInfo, ResumeDocument, WorkExperienceEntry};
use crate::templates::TemplateId;
use variants::{Banded, ProjectLayout, Ruled, SidePanel};

/// Renders the document with its own selected template.
pub fn render(doc: &ResumeDocument) -> PageLayout {
    render_with(doc, doc.selected_template_id)
}

pub fn render_with(doc: &ResumeDocument, template: TemplateId) -> PageLayout {
    let view = ResumeView::from_document(doc);
    match template {
        TemplateId::Classic | TemplateId::Modern => Banded::new(template).project(&view),
        TemplateId::Creative => SidePanel.project(&view),
        TemplateId::Minimal => Ruled.project(&view),
    }
}

/// Gallery thumbnail: the template rendered against fixed sample content.
pub fn render_thumbnail(template: TemplateId) -> PageLayout {
    render_with(&sample_document(), template)
}

fn sample_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            first_name: "Chris".into(),
            last_name: "Candidate".into(),
            email: "chris@email.com".into(),
            mobile: "+1 234 567 890".into(),
            ..PersonalInfo::default()
        },
        work_experience: vec![WorkExperienceEntry {
            id: "1".into(),
            job_title: "Human Resource Manager".into(),
            organization: "Sample Company".into(),
            start_year: "2019".into(),
            end_year: "Present".into(),
        }],
        education: vec![EducationEntry {
            id: "1".into(),
            degree: "BA Psychology".into(),
            institution: "Sample University".into(),
            start_year: "2014".into(),
            end_year: "2018".into(),
        }],
        skills: vec!["Recruiting".into(), "Onboarding".into(), "Payroll".into()],
        ..ResumeDocument::default()
    }
}
