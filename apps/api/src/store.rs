//! Resume data store: the single committed copy of a session's document.
//!
//! Setters replace a whole slice at a time; readers get the stored value back
//! unchanged. There is no validation here: callers (the wizard) validate first.
//! The per-row add/remove operations are kept for callers that edit the
//! committed document directly; the wizard edits its draft instead.
#![allow(dead_code)]

use crate::models::{EducationEntry, PersonalInfo, ResumeDocument, WorkExperienceEntry};
use crate::templates::TemplateId;

#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    document: ResumeDocument,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        &self.document.personal_info
    }

    pub fn work_experience(&self) -> &[WorkExperienceEntry] {
        &self.document.work_experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.document.education
    }

    pub fn skills(&self) -> &[String] {
        &self.document.skills
    }

    pub fn selected_template(&self) -> TemplateId {
        self.document.selected_template_id
    }

    pub fn resume_name(&self) -> &str {
        &self.document.resume_name
    }

    pub fn set_personal_info(&mut self, info: PersonalInfo) {
        self.document.personal_info = info;
    }

    pub fn set_work_experience(&mut self, entries: Vec<WorkExperienceEntry>) {
        self.document.work_experience = entries;
    }

    /// Appends an empty row and returns its id.
    pub fn add_work_experience(&mut self) -> String {
        let entry = WorkExperienceEntry::blank();
        let id = entry.id.clone();
        self.document.work_experience.push(entry);
        id
    }

    /// Drops every row with `id`. Returns whether anything was removed.
    pub fn remove_work_experience(&mut self, id: &str) -> bool {
        let before = self.document.work_experience.len();
        self.document.work_experience.retain(|e| e.id != id);
        self.document.work_experience.len() != before
    }

    pub fn set_education(&mut self, entries: Vec<EducationEntry>) {
        self.document.education = entries;
    }

    pub fn add_education(&mut self) -> String {
        let entry = EducationEntry::blank();
        let id = entry.id.clone();
        self.document.education.push(entry);
        id
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        let before = self.document.education.len();
        self.document.education.retain(|e| e.id != id);
        self.document.education.len() != before
    }

    pub fn set_skills(&mut self, skills: Vec<String>) {
        self.document.skills = skills;
    }

    pub fn add_skill(&mut self) {
        self.document.skills.push(String::new());
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_skill(&mut self, index: usize) -> bool {
        if index < self.document.skills.len() {
            self.document.skills.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_selected_template(&mut self, id: TemplateId) {
        self.document.selected_template_id = id;
    }

    pub fn set_resume_name(&mut self, name: impl Into<String>) {
        self.document.resume_name = name.into();
    }

    pub fn reset(&mut self) {
        self.document = ResumeDocument::default();
    }
}
