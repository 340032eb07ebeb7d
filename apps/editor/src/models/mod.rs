pub mod resume;

pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ResumePatch, ResumeState};
