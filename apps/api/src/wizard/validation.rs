//! Per-stage field rules. Every rule is checked so a failed submit reports all
//! offending fields at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::{EducationEntry, PersonalInfo, WorkExperienceEntry, PRESENT};

const NAME_MAX: usize = 50;
const ADDRESS_MAX: usize = 200;
const REGION_MAX: usize = 50;
const MOBILE_MIN: usize = 10;
const MOBILE_MAX: usize = 15;
const ENTRY_FIELD_MAX: usize = 100;
const SKILL_MAX: usize = 50;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("year pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path into the submitted form, e.g. `experiences[1].job_title`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Required and at most `max` characters.
    fn required(&mut self, field: &str, value: &str, label: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is required"));
        } else if value.chars().count() > max {
            self.push(field, format!("{label} must be at most {max} characters"));
        }
    }

    fn year(&mut self, field: &str, value: &str, label: &str, allow_present: bool) {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{label} is required"));
        } else if !(YEAR_RE.is_match(value) || (allow_present && value == PRESENT)) {
            let expected = if allow_present {
                format!("a 4-digit year or \"{PRESENT}\"")
            } else {
                "a 4-digit year".to_string()
            };
            self.push(field, format!("{label} must be {expected}"));
        }
    }
}

pub fn validate_personal(info: &PersonalInfo) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.required("first_name", &info.first_name, "First name", NAME_MAX);
    errors.required("last_name", &info.last_name, "Last name", NAME_MAX);

    if !EMAIL_RE.is_match(info.email.trim()) {
        errors.push("email", "Invalid email address");
    }

    let mobile_len = info.mobile.trim().chars().count();
    if !(MOBILE_MIN..=MOBILE_MAX).contains(&mobile_len) {
        errors.push(
            "mobile",
            format!("Invalid mobile number (expected {MOBILE_MIN}-{MOBILE_MAX} characters)"),
        );
    }

    errors.required("address", &info.address, "Address", ADDRESS_MAX);
    errors.required("city", &info.city, "City", REGION_MAX);
    errors.required("state", &info.state, "State", REGION_MAX);

    errors.into_result()
}

pub fn validate_work(entries: &[WorkExperienceEntry]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if entries.is_empty() {
        errors.push("experiences", "At least one entry is required");
    }
    for (i, e) in entries.iter().enumerate() {
        let at = |f: &str| format!("experiences[{i}].{f}");
        errors.required(&at("job_title"), &e.job_title, "Job title", ENTRY_FIELD_MAX);
        errors.required(&at("organization"), &e.organization, "Organization", ENTRY_FIELD_MAX);
        errors.year(&at("start_year"), &e.start_year, "Start year", false);
        errors.year(&at("end_year"), &e.end_year, "End year", true);
    }
    errors.into_result()
}

pub fn validate_education(entries: &[EducationEntry]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if entries.is_empty() {
        errors.push("education", "At least one entry is required");
    }
    for (i, e) in entries.iter().enumerate() {
        let at = |f: &str| format!("education[{i}].{f}");
        errors.required(&at("degree"), &e.degree, "Degree", ENTRY_FIELD_MAX);
        errors.required(&at("institution"), &e.institution, "Institution", ENTRY_FIELD_MAX);
        errors.year(&at("start_year"), &e.start_year, "Start year", false);
        errors.year(&at("end_year"), &e.end_year, "End year", true);
    }
    errors.into_result()
}

pub fn validate_skills(skills: &[String]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if skills.is_empty() {
        errors.push("skills", "At least one skill is required");
    }
    for (i, skill) in skills.iter().enumerate() {
        errors.required(&format!("skills[{i}]"), skill, "Skill", SKILL_MAX);
    }
    errors.into_result()
}
