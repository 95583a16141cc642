//! Template-independent projection of a document: the filtering and
//! fallback rules every layout shares, applied once.

use serde::Serialize;

use crate::models::{PersonalInfo, ResumeDocument};

pub const NAME_FALLBACK: &str = "Your Name";

/// One experience or education line item as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    /// Job title or degree.
    pub title: String,
    /// Organization or institution.
    pub subtitle: String,
    /// `"{start} - {end}"`.
    pub period: String,
}

impl EntryRow {
    fn new(title: &str, subtitle: &str, start: &str, end: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            period: format!("{start} - {end}"),
        }
    }

    /// `"title / subtitle / period"`.
    #[cfg(test)]
    pub fn summary(&self) -> String {
        format!("{} / {} / {}", self.title, self.subtitle, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeView {
    pub full_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub experience: Vec<EntryRow>,
    pub education: Vec<EntryRow>,
    pub skills: Vec<String>,
}

impl ResumeView {
    pub fn from_document(doc: &ResumeDocument) -> Self {
        let info = &doc.personal_info;

        let experience = doc
            .work_experience
            .iter()
            .filter(|e| is_present(&e.job_title))
            .map(|e| EntryRow::new(&e.job_title, &e.organization, &e.start_year, &e.end_year))
            .collect();

        let education = doc
            .education
            .iter()
            .filter(|e| is_present(&e.degree))
            .map(|e| EntryRow::new(&e.degree, &e.institution, &e.start_year, &e.end_year))
            .collect();

        let skills = doc
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        ResumeView {
            full_name: full_name(info),
            email: non_blank(&info.email),
            mobile: non_blank(&info.mobile),
            location: location_line(info),
            experience,
            education,
            skills,
        }
    }

    /// Contact values in display order: email, mobile, location.
    pub fn contacts(&self) -> Vec<&str> {
        [&self.email, &self.mobile, &self.location]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .collect()
    }
}

/// `first + " " + last`, trimmed; `"Your Name"` when nothing is left.
pub fn full_name(info: &PersonalInfo) -> String {
    let joined = format!("{} {}", info.first_name, info.last_name);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        NAME_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}

/// City and state joined with `", "`, skipping blanks. `None` when both are blank.
pub fn location_line(info: &PersonalInfo) -> Option<String> {
    let parts: Vec<&str> = [info.city.as_str(), info.state.as_str()]
        .into_iter()
        .filter(|p| is_present(p))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn non_blank(value: &str) -> Option<String> {
    is_present(value).then(|| value.to_string())
}
