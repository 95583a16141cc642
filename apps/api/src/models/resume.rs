use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::templates::TemplateId;

/// Sentinel accepted in `end_year` for an ongoing job or course.
pub const PRESENT: &str = "Present";

pub const DEFAULT_RESUME_NAME: &str = "My Resume";

/// Contact block collected by the Personal stage.
///
/// No invariants are enforced here; the wizard validates before committing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Collected but never rendered.
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperienceEntry {
    pub id: String,
    pub job_title: String,
    pub organization: String,
    pub start_year: String,
    pub end_year: String,
}

impl WorkExperienceEntry {
    /// An empty row carrying a fresh unique id.
    pub fn blank() -> Self {
        Self {
            id: new_row_id(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub start_year: String,
    pub end_year: String,
}

impl EducationEntry {
    pub fn blank() -> Self {
        Self {
            id: new_row_id(),
            ..Self::default()
        }
    }
}

/// Aggregate root. Owns every child list exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Blank skills stay stored until the user deletes them; the renderer skips them.
    pub skills: Vec<String>,
    pub selected_template_id: TemplateId,
    pub resume_name: String,
}

impl Default for ResumeDocument {
    /// Session start state: one empty work row, one empty education row and one
    /// empty skill slot, all with the placeholder id `"1"`.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            work_experience: vec![WorkExperienceEntry {
                id: "1".to_string(),
                ..WorkExperienceEntry::default()
            }],
            education: vec![EducationEntry {
                id: "1".to_string(),
                ..EducationEntry::default()
            }],
            skills: vec![String::new()],
            selected_template_id: TemplateId::Classic,
            resume_name: DEFAULT_RESUME_NAME.to_string(),
        }
    }
}

pub fn new_row_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_has_one_row_per_list() {
        let doc = ResumeDocument::default();
        assert_eq!(doc.work_experience.len(), 1);
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.skills, vec![String::new()]);
        assert_eq!(doc.work_experience[0].id, "1");
        assert_eq!(doc.selected_template_id, TemplateId::Classic);
        assert_eq!(doc.resume_name, "My Resume");
    }

    #[test]
    fn test_blank_rows_get_distinct_ids() {
        let a = WorkExperienceEntry::blank();
        let b = WorkExperienceEntry::blank();
        assert_ne!(a.id, b.id);
        assert!(a.job_title.is_empty());
    }

    #[test]
    fn test_document_json_uses_integer_template_id() {
        let doc = ResumeDocument::default();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["selected_template_id"], 0);
        assert_eq!(json["personal_info"]["first_name"], "");
    }

    #[test]
    fn test_unknown_template_id_deserializes_to_classic() {
        let mut json = serde_json::to_value(ResumeDocument::default()).unwrap();
        json["selected_template_id"] = serde_json::json!(42);
        let doc: ResumeDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.selected_template_id, TemplateId::Classic);
    }
}
