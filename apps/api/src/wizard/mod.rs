//! Form wizard: four ordered stages that each load a slice of the committed
//! document into a draft, validate it on submit, and write it back wholesale.
//!
//! Drafts belong to the stage being edited. Leaving a stage by any route other
//! than a successful submit (Back, or jumping to another stage tab) drops the
//! draft; re-entering a stage always starts from what was last committed.

pub mod validation;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{EducationEntry, PersonalInfo, WorkExperienceEntry};
use crate::store::ResumeStore;
pub use validation::{FieldError, ValidationErrors};

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Personal,
    Work,
    Education,
    Skills,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Personal => Some(Stage::Work),
            Stage::Work => Some(Stage::Education),
            Stage::Education => Some(Stage::Skills),
            Stage::Skills => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Personal => None,
            Stage::Work => Some(Stage::Personal),
            Stage::Education => Some(Stage::Work),
            Stage::Skills => Some(Stage::Education),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Personal => "Personal Info",
            Stage::Work => "Work Experience",
            Stage::Education => "Education",
            Stage::Skills => "Key Skills",
        }
    }
}

/// Form values for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "values", rename_all = "snake_case")]
pub enum StageForm {
    Personal(PersonalInfo),
    Work(Vec<WorkExperienceEntry>),
    Education(Vec<EducationEntry>),
    Skills(Vec<String>),
}

impl StageForm {
    pub fn stage(&self) -> Stage {
        match self {
            StageForm::Personal(_) => Stage::Personal,
            StageForm::Work(_) => Stage::Work,
            StageForm::Education(_) => Stage::Education,
            StageForm::Skills(_) => Stage::Skills,
        }
    }

    /// The committed slice for `stage`, as initial form values.
    pub fn load(stage: Stage, store: &ResumeStore) -> Self {
        match stage {
            Stage::Personal => StageForm::Personal(store.personal_info().clone()),
            Stage::Work => StageForm::Work(store.work_experience().to_vec()),
            Stage::Education => StageForm::Education(store.education().to_vec()),
            Stage::Skills => StageForm::Skills(store.skills().to_vec()),
        }
    }

    fn row_count(&self) -> Option<usize> {
        match self {
            StageForm::Personal(_) => None,
            StageForm::Work(rows) => Some(rows.len()),
            StageForm::Education(rows) => Some(rows.len()),
            StageForm::Skills(rows) => Some(rows.len()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors and outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("Form for the {submitted:?} stage submitted while on the {current:?} stage")]
    StageMismatch { current: Stage, submitted: Stage },

    #[error("The {0:?} stage has no rows")]
    NoRows(Stage),

    #[error("Row '{0}' not found")]
    RowNotFound(String),

    #[error("The last row cannot be removed")]
    LastRow,

    #[error("There is no stage before {0:?}")]
    AtFirstStage(Stage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    Advanced { stage: Stage },
    /// Skills committed; the document is ready to preview.
    ReadyForPreview,
}

/// Identifier of a newly added draft row: an id for work/education, a
/// position for skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Wizard {
    stage: Stage,
    draft: StageForm,
}

impl Wizard {
    /// Starts on the Personal stage with the committed personal info.
    pub fn new(store: &ResumeStore) -> Self {
        Self::at(Stage::Personal, store)
    }

    fn at(stage: Stage, store: &ResumeStore) -> Self {
        Self {
            stage,
            draft: StageForm::load(stage, store),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &StageForm {
        &self.draft
    }

    /// Replaces the in-progress values without validating or committing.
    pub fn update_draft(&mut self, form: StageForm) -> Result<(), WizardError> {
        self.expect_stage(form.stage())?;
        self.draft = form;
        Ok(())
    }

    pub fn add_row(&mut self) -> Result<RowKey, WizardError> {
        match &mut self.draft {
            StageForm::Personal(_) => Err(WizardError::NoRows(Stage::Personal)),
            StageForm::Work(rows) => {
                let row = WorkExperienceEntry::blank();
                let key = RowKey::Id(row.id.clone());
                rows.push(row);
                Ok(key)
            }
            StageForm::Education(rows) => {
                let row = EducationEntry::blank();
                let key = RowKey::Id(row.id.clone());
                rows.push(row);
                Ok(key)
            }
            StageForm::Skills(rows) => {
                rows.push(String::new());
                Ok(RowKey::Index(rows.len() - 1))
            }
        }
    }

    /// Removes a draft row: by id for work/education, by position for skills.
    /// The last remaining row always stays.
    pub fn remove_row(&mut self, key: &str) -> Result<(), WizardError> {
        let count = self.draft.row_count().ok_or(WizardError::NoRows(self.stage))?;
        let not_found = || WizardError::RowNotFound(key.to_string());

        let position = match &self.draft {
            StageForm::Personal(_) => None,
            StageForm::Work(rows) => rows.iter().position(|r| r.id == key),
            StageForm::Education(rows) => rows.iter().position(|r| r.id == key),
            StageForm::Skills(_) => key.parse::<usize>().ok().filter(|i| *i < count),
        }
        .ok_or_else(not_found)?;

        if count <= 1 {
            return Err(WizardError::LastRow);
        }

        match &mut self.draft {
            StageForm::Personal(_) => {}
            StageForm::Work(rows) => {
                rows.remove(position);
            }
            StageForm::Education(rows) => {
                rows.remove(position);
            }
            StageForm::Skills(rows) => {
                rows.remove(position);
            }
        }
        Ok(())
    }

    /// Validates `form` and, on success, commits it and moves on.
    ///
    /// A rejected form stays in the draft so it can be corrected; nothing is
    /// written to the store and the stage does not change.
    pub fn submit(&mut self, store: &mut ResumeStore, form: StageForm) -> Result<Transition, WizardError> {
        self.expect_stage(form.stage())?;
        self.draft = form.clone();

        match form {
            StageForm::Personal(info) => {
                validation::validate_personal(&info)?;
                store.set_personal_info(info);
            }
            StageForm::Work(rows) => {
                validation::validate_work(&rows)?;
                store.set_work_experience(rows);
            }
            StageForm::Education(rows) => {
                validation::validate_education(&rows)?;
                store.set_education(rows);
            }
            StageForm::Skills(skills) => {
                validation::validate_skills(&skills)?;
                store.set_skills(skills);
            }
        }
        debug!(stage = ?self.stage, "Stage committed");

        match self.stage.next() {
            Some(next) => {
                self.enter(next, store);
                Ok(Transition::Advanced { stage: next })
            }
            None => {
                self.enter(self.stage, store);
                Ok(Transition::ReadyForPreview)
            }
        }
    }

    /// Returns to the previous stage, discarding the current draft.
    pub fn back(&mut self, store: &ResumeStore) -> Result<Stage, WizardError> {
        let previous = self
            .stage
            .previous()
            .ok_or(WizardError::AtFirstStage(self.stage))?;
        self.enter(previous, store);
        Ok(previous)
    }

    /// Jumps straight to `stage` (a stage tab). The current draft is discarded.
    pub fn go_to(&mut self, stage: Stage, store: &ResumeStore) {
        self.enter(stage, store);
    }

    fn enter(&mut self, stage: Stage, store: &ResumeStore) {
        *self = Self::at(stage, store);
    }

    fn expect_stage(&self, submitted: Stage) -> Result<(), WizardError> {
        if submitted == self.stage {
            Ok(())
        } else {
            Err(WizardError::StageMismatch {
                current: self.stage,
                submitted,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal() -> PersonalInfo {
        PersonalInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            mobile: "5551234567".into(),
            address: "1 Main St".into(),
            city: "Austin".into(),
            state: "TX".into(),
            profile_image: None,
        }
    }

    fn job(id: &str, title: &str) -> WorkExperienceEntry {
        WorkExperienceEntry {
            id: id.into(),
            job_title: title.into(),
            organization: "Acme".into(),
            start_year: "2020".into(),
            end_year: "Present".into(),
        }
    }

    fn degree(id: &str) -> EducationEntry {
        EducationEntry {
            id: id.into(),
            degree: "BSc".into(),
            institution: "State U".into(),
            start_year: "2016".into(),
            end_year: "2020".into(),
        }
    }

    fn at_work_stage() -> (Wizard, ResumeStore) {
        let mut store = ResumeStore::new();
        let mut wizard = Wizard::new(&store);
        wizard.submit(&mut store, StageForm::Personal(personal())).unwrap();
        (wizard, store)
    }

    #[test]
    fn test_starts_on_personal_with_committed_values() {
        let store = ResumeStore::new();
        let wizard = Wizard::new(&store);
        assert_eq!(wizard.stage(), Stage::Personal);
        assert_eq!(wizard.draft(), &StageForm::Personal(PersonalInfo::default()));
    }

    #[test]
    fn test_full_walk_reaches_preview() {
        let (mut wizard, mut store) = at_work_stage();
        assert_eq!(wizard.stage(), Stage::Work);
        assert_eq!(
            wizard.submit(&mut store, StageForm::Work(vec![job("1", "Engineer")])).unwrap(),
            Transition::Advanced { stage: Stage::Education }
        );
        assert_eq!(
            wizard.submit(&mut store, StageForm::Education(vec![degree("1")])).unwrap(),
            Transition::Advanced { stage: Stage::Skills }
        );
        assert_eq!(
            wizard
                .submit(&mut store, StageForm::Skills(vec!["Go".into(), "Testing".into()]))
                .unwrap(),
            Transition::ReadyForPreview
        );
        assert_eq!(wizard.stage(), Stage::Skills);
        assert_eq!(store.personal_info().first_name, "Jane");
        assert_eq!(store.skills(), &["Go", "Testing"]);
    }

    #[test]
    fn test_invalid_submit_blocks_and_keeps_draft() {
        let mut store = ResumeStore::new();
        let mut wizard = Wizard::new(&store);
        let mut info = personal();
        info.email = "nope".into();

        let err = wizard.submit(&mut store, StageForm::Personal(info.clone())).unwrap_err();
        match err {
            WizardError::Invalid(errors) => assert_eq!(errors.fields(), vec!["email"]),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(wizard.stage(), Stage::Personal);
        assert_eq!(wizard.draft(), &StageForm::Personal(info));
        assert_eq!(store.personal_info(), &PersonalInfo::default());
    }

    #[test]
    fn test_forward_then_back_restores_committed_rows_not_edits() {
        let (mut wizard, mut store) = at_work_stage();
        let committed = vec![job("a", "Engineer"), job("b", "Lead"), job("c", "Manager")];
        wizard.submit(&mut store, StageForm::Work(committed.clone())).unwrap();

        assert_eq!(wizard.back(&store).unwrap(), Stage::Work);
        // Edit after commit, then leave without submitting.
        wizard
            .update_draft(StageForm::Work(vec![job("a", "Changed")]))
            .unwrap();
        wizard.add_row().unwrap();
        assert_eq!(wizard.back(&store).unwrap(), Stage::Personal);

        wizard.go_to(Stage::Work, &store);
        assert_eq!(wizard.draft(), &StageForm::Work(committed));
    }

    #[test]
    fn test_empty_row_list_is_not_committed() {
        let (mut wizard, mut store) = at_work_stage();
        let err = wizard.submit(&mut store, StageForm::Work(vec![])).unwrap_err();
        match err {
            WizardError::Invalid(errors) => assert_eq!(errors.fields(), vec!["experiences"]),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(wizard.stage(), Stage::Work);
        assert_eq!(store.work_experience().len(), 1);
    }

    #[test]
    fn test_back_from_personal_is_rejected() {
        let store = ResumeStore::new();
        let mut wizard = Wizard::new(&store);
        assert!(matches!(
            wizard.back(&store),
            Err(WizardError::AtFirstStage(Stage::Personal))
        ));
    }

    #[test]
    fn test_back_keeps_committed_values() {
        let (mut wizard, store) = at_work_stage();
        wizard.back(&store).unwrap();
        assert_eq!(wizard.draft(), &StageForm::Personal(personal()));
    }

    #[test]
    fn test_stage_mismatch_rejected() {
        let (mut wizard, mut store) = at_work_stage();
        let err = wizard
            .submit(&mut store, StageForm::Skills(vec!["Go".into()]))
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::StageMismatch { current: Stage::Work, submitted: Stage::Skills }
        ));
        assert_eq!(store.skills(), &[""]);
    }

    #[test]
    fn test_row_edits_touch_draft_only() {
        let (mut wizard, store) = at_work_stage();
        let key = wizard.add_row().unwrap();
        let id = match key {
            RowKey::Id(id) => id,
            other => panic!("expected id, got {other:?}"),
        };
        assert_eq!(wizard.draft().row_count(), Some(2));
        assert_eq!(store.work_experience().len(), 1);

        wizard.remove_row(&id).unwrap();
        assert_eq!(wizard.draft().row_count(), Some(1));
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let (mut wizard, _store) = at_work_stage();
        assert!(matches!(wizard.remove_row("1"), Err(WizardError::LastRow)));
        assert!(matches!(
            wizard.remove_row("missing"),
            Err(WizardError::RowNotFound(_))
        ));
    }

    #[test]
    fn test_skill_rows_are_removed_by_index() {
        let mut store = ResumeStore::new();
        store.set_skills(vec!["Go".into(), "Rust".into(), "SQL".into()]);
        let mut wizard = Wizard::new(&store);
        wizard.go_to(Stage::Skills, &store);

        assert_eq!(wizard.add_row().unwrap(), RowKey::Index(3));
        wizard.remove_row("1").unwrap();
        assert_eq!(
            wizard.draft(),
            &StageForm::Skills(vec!["Go".into(), "SQL".into(), "".into()])
        );
        assert!(matches!(wizard.remove_row("9"), Err(WizardError::RowNotFound(_))));
        assert!(matches!(wizard.remove_row("x"), Err(WizardError::RowNotFound(_))));
    }

    #[test]
    fn test_personal_stage_has_no_rows() {
        let store = ResumeStore::new();
        let mut wizard = Wizard::new(&store);
        assert!(matches!(wizard.add_row(), Err(WizardError::NoRows(Stage::Personal))));
        assert!(matches!(wizard.remove_row("1"), Err(WizardError::NoRows(Stage::Personal))));
    }

    #[test]
    fn test_stage_form_json_shape() {
        let form: StageForm = serde_json::from_value(serde_json::json!({
            "stage": "skills",
            "values": ["Go", "Testing"]
        }))
        .unwrap();
        assert_eq!(form, StageForm::Skills(vec!["Go".into(), "Testing".into()]));
    }
}
