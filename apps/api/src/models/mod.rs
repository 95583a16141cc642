pub mod resume;

pub use resume::{EducationEntry, PersonalInfo, ResumeDocument, WorkExperienceEntry, PRESENT};
