use serde::{Deserialize, Serialize};

/// The full resume document. This is the only value the store persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeState {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub website: String,
    pub location: String,
    pub headline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub id: u32,
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub id: u32,
    pub school: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
}

/// A top-level update. Each present key replaces the matching top-level
/// field of [`ResumeState`] wholesale; absent keys leave it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl ResumePatch {
    pub fn personal(personal: PersonalInfo) -> Self {
        Self {
            personal: Some(personal),
            ..Default::default()
        }
    }

    pub fn experience(entries: Vec<ExperienceEntry>) -> Self {
        Self {
            experience: Some(entries),
            ..Default::default()
        }
    }

    pub fn education(entries: Vec<EducationEntry>) -> Self {
        Self {
            education: Some(entries),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn skills(skills: impl Into<String>) -> Self {
        Self {
            skills: Some(skills.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.personal.is_none()
            && self.experience.is_none()
            && self.education.is_none()
            && self.skills.is_none()
    }
}

impl ResumeState {
    /// Shallow merge: depth 1 is merged, depth 2 is replaced.
    pub fn apply(&mut self, patch: ResumePatch) {
        let ResumePatch {
            personal,
            experience,
            education,
            skills,
        } = patch;
        if let Some(personal) = personal {
            self.personal = personal;
        }
        if let Some(experience) = experience {
            self.experience = experience;
        }
        if let Some(education) = education {
            self.education = education;
        }
        if let Some(skills) = skills {
            self.skills = skills;
        }
    }

    /// The seed document used when nothing usable is persisted.
    pub fn seed() -> Self {
        ResumeState {
            personal: PersonalInfo {
                full_name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "+1 234 567 890".to_string(),
                linkedin: "linkedin.com/in/johndoe".to_string(),
                website: "johndoe.com".to_string(),
                location: "New York, NY".to_string(),
                headline: "Senior Software Engineer".to_string(),
            },
            experience: vec![ExperienceEntry {
                id: 1,
                company: "Tech Corp".to_string(),
                role: "Senior Developer".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "Present".to_string(),
                description: "• Led a team of 5 developers\n• Architected microservices"
                    .to_string(),
            }],
            education: vec![EducationEntry {
                id: 1,
                school: "University of Tech".to_string(),
                degree: "B.S. CS".to_string(),
                location: "Boston, MA".to_string(),
                start_date: "2015".to_string(),
                end_date: "2019".to_string(),
            }],
            skills: "JavaScript, React, Node.js".to_string(),
        }
    }
}

impl Default for ResumeState {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values() {
        let s = ResumeState::seed();
        assert_eq!(s.personal.full_name, "John Doe");
        assert_eq!(s.personal.email, "john.doe@example.com");
        assert_eq!(s.experience.len(), 1);
        assert_eq!(s.education[0].school, "University of Tech");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&ResumeState::seed()).unwrap();
        assert!(json.contains("\"fullName\":\"John Doe\""));
        assert!(json.contains("\"startDate\":\"2020-01\""));
        assert!(!json.contains("full_name"));
    }

    #[test]
    fn test_apply_replaces_only_present_keys() {
        let mut s = ResumeState::seed();
        let before = s.clone();
        s.apply(ResumePatch::skills("Rust, SQL"));
        assert_eq!(s.skills, "Rust, SQL");
        assert_eq!(s.personal, before.personal);
        assert_eq!(s.experience, before.experience);
        assert_eq!(s.education, before.education);
    }

    #[test]
    fn test_apply_replaces_sub_record_wholesale() {
        let mut s = ResumeState::seed();
        s.apply(ResumePatch::personal(PersonalInfo {
            full_name: "Jane Smith".to_string(),
            ..Default::default()
        }));
        assert_eq!(s.personal.full_name, "Jane Smith");
        // Siblings not carried in the patch are gone.
        assert_eq!(s.personal.email, "");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut s = ResumeState::seed();
        let patch = ResumePatch::default();
        assert!(patch.is_empty());
        s.apply(patch);
        assert_eq!(s, ResumeState::seed());
    }

    #[test]
    fn test_patch_rejects_unknown_keys() {
        let r: Result<ResumePatch, _> = serde_json::from_str(r#"{"projects": []}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_patch_from_partial_json() {
        let p: ResumePatch = serde_json::from_str(r#"{"skills": "Go"}"#).unwrap();
        assert_eq!(p.skills.as_deref(), Some("Go"));
        assert!(p.personal.is_none());
    }
}
