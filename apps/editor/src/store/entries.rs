//! Editing of the list-shaped fields (`experience`, `education`).
//!
//! The store only merges at the top level, so every list edit builds the
//! complete replacement sequence and hands it back as a one-key patch.
//! Entry order is always preserved.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{EducationEntry, ExperienceEntry, ResumePatch, ResumeState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("No {section} entry with id {id}")]
    NotFound { section: &'static str, id: u32 },

    #[error("Duplicate {section} entry id {id}")]
    DuplicateId { section: &'static str, id: u32 },

    #[error("No {section} ids left to assign")]
    IdExhausted { section: &'static str },
}

/// An identified entry of one of the list-shaped resume sections.
pub trait ListEntry: Clone {
    const SECTION: &'static str;

    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
    fn entries(state: &ResumeState) -> &[Self];
    fn into_patch(entries: Vec<Self>) -> ResumePatch;
}

impl ListEntry for ExperienceEntry {
    const SECTION: &'static str = "experience";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn entries(state: &ResumeState) -> &[Self] {
        &state.experience
    }

    fn into_patch(entries: Vec<Self>) -> ResumePatch {
        ResumePatch::experience(entries)
    }
}

impl ListEntry for EducationEntry {
    const SECTION: &'static str = "education";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn entries(state: &ResumeState) -> &[Self] {
        &state.education
    }

    fn into_patch(entries: Vec<Self>) -> ResumePatch {
        ResumePatch::education(entries)
    }
}

/// Next free id: one past the largest in use, starting at 1.
pub fn next_id<E: ListEntry>(entries: &[E]) -> Result<u32, EntryError> {
    entries
        .iter()
        .map(|e| e.id())
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(EntryError::IdExhausted {
            section: E::SECTION,
        })
}

/// Appends `entry` under a fresh id. Returns the new list and the entry
/// as stored.
pub fn with_added<E: ListEntry>(
    entries: &[E],
    mut entry: E,
) -> Result<(Vec<E>, E), EntryError> {
    entry.set_id(next_id(entries)?);
    let mut out = entries.to_vec();
    out.push(entry.clone());
    Ok((out, entry))
}

/// Ids must be unique within one section.
pub fn check_unique_ids<E: ListEntry>(entries: &[E]) -> Result<(), EntryError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id()) {
            return Err(EntryError::DuplicateId {
                section: E::SECTION,
                id: entry.id(),
            });
        }
    }
    Ok(())
}

/// Checks the list-shaped keys a patch carries.
pub fn validate_patch(patch: &ResumePatch) -> Result<(), EntryError> {
    if let Some(experience) = &patch.experience {
        check_unique_ids(experience)?;
    }
    if let Some(education) = &patch.education {
        check_unique_ids(education)?;
    }
    Ok(())
}

pub fn validate_state(state: &ResumeState) -> Result<(), EntryError> {
    check_unique_ids(&state.experience)?;
    check_unique_ids(&state.education)
}

/// Replaces the entry with `id` in place. The replacement keeps `id`
/// regardless of what it carried.
pub fn with_replaced<E: ListEntry>(
    entries: &[E],
    id: u32,
    mut entry: E,
) -> Result<Vec<E>, EntryError> {
    let pos = position(entries, id)?;
    entry.set_id(id);
    let mut out = entries.to_vec();
    out[pos] = entry;
    Ok(out)
}

pub fn without<E: ListEntry>(entries: &[E], id: u32) -> Result<Vec<E>, EntryError> {
    let pos = position(entries, id)?;
    let mut out = entries.to_vec();
    out.remove(pos);
    Ok(out)
}

fn position<E: ListEntry>(entries: &[E], id: u32) -> Result<usize, EntryError> {
    entries
        .iter()
        .position(|e| e.id() == id)
        .ok_or(EntryError::NotFound {
            section: E::SECTION,
            id,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u32, company: &str) -> ExperienceEntry {
        ExperienceEntry {
            id,
            company: company.to_string(),
            role: "Engineer".to_string(),
            location: String::new(),
            start_date: "2021".to_string(),
            end_date: "2022".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_next_id_empty_list() {
        let empty: Vec<ExperienceEntry> = vec![];
        assert_eq!(next_id(&empty), Ok(1));
    }

    #[test]
    fn test_next_id_skips_past_gaps() {
        let list = vec![job(1, "A"), job(7, "B"), job(3, "C")];
        assert_eq!(next_id(&list), Ok(8));
    }

    #[test]
    fn test_next_id_at_u32_max_is_exhausted() {
        let list = vec![job(u32::MAX, "A")];
        assert_eq!(
            next_id(&list),
            Err(EntryError::IdExhausted {
                section: "experience"
            })
        );
        assert!(with_added(&list, job(0, "B")).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let list = vec![job(0, "A"), job(0, "B")];
        assert_eq!(
            check_unique_ids(&list),
            Err(EntryError::DuplicateId {
                section: "experience",
                id: 0
            })
        );
        assert!(validate_patch(&ResumePatch::experience(list)).is_err());
        assert!(validate_patch(&ResumePatch::skills("Rust")).is_ok());
        assert!(validate_state(&ResumeState::seed()).is_ok());
    }

    #[test]
    fn test_with_added_appends_with_fresh_id() {
        let list = vec![job(1, "A")];
        let (out, added) = with_added(&list, job(0, "B")).unwrap();
        assert_eq!(added.id, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].company, "B");
        assert_eq!(out[1].id, 2);
        // Input untouched.
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_with_replaced_keeps_position_and_id() {
        let list = vec![job(1, "A"), job(2, "B"), job(3, "C")];
        let out = with_replaced(&list, 2, job(99, "B2")).unwrap();
        assert_eq!(
            out.iter().map(|e| (e.id, e.company.as_str())).collect::<Vec<_>>(),
            vec![(1, "A"), (2, "B2"), (3, "C")]
        );
    }

    #[test]
    fn test_with_replaced_unknown_id() {
        let list = vec![job(1, "A")];
        assert_eq!(
            with_replaced(&list, 5, job(5, "X")).unwrap_err(),
            EntryError::NotFound {
                section: "experience",
                id: 5
            }
        );
    }

    #[test]
    fn test_without_preserves_order() {
        let list = vec![job(1, "A"), job(2, "B"), job(3, "C")];
        let out = without(&list, 2).unwrap();
        assert_eq!(out.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_without_unknown_id() {
        let list: Vec<EducationEntry> = ResumeState::seed().education;
        let err = without(&list, 42).unwrap_err();
        assert_eq!(err.to_string(), "No education entry with id 42");
    }

    #[test]
    fn test_into_patch_touches_one_key() {
        let state = ResumeState::seed();
        let (list, _) = with_added(ExperienceEntry::entries(&state), job(0, "New Co")).unwrap();
        let patch = ExperienceEntry::into_patch(list);
        assert!(patch.experience.is_some());
        assert!(patch.personal.is_none());
        assert!(patch.education.is_none());
        assert!(patch.skills.is_none());
    }
}
