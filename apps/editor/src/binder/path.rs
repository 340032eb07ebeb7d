use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::PersonalInfo;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid field path '{0}': expected '<section>.<field>'")]
    Malformed(String),

    #[error("Section '{0}' has no bindable fields")]
    UnknownSection(String),

    #[error("Unknown field '{field}' in section '{section}'")]
    UnknownField { section: String, field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Linkedin,
    Website,
    Location,
    Headline,
}

impl PersonalField {
    pub const ALL: [PersonalField; 7] = [
        PersonalField::FullName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Linkedin,
        PersonalField::Website,
        PersonalField::Location,
        PersonalField::Headline,
    ];

    /// Leaf name as it appears in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Website => "website",
            PersonalField::Location => "location",
            PersonalField::Headline => "headline",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn get(self, personal: &PersonalInfo) -> &str {
        match self {
            PersonalField::FullName => &personal.full_name,
            PersonalField::Email => &personal.email,
            PersonalField::Phone => &personal.phone,
            PersonalField::Linkedin => &personal.linkedin,
            PersonalField::Website => &personal.website,
            PersonalField::Location => &personal.location,
            PersonalField::Headline => &personal.headline,
        }
    }

    pub fn set(self, personal: &mut PersonalInfo, value: String) {
        let slot = match self {
            PersonalField::FullName => &mut personal.full_name,
            PersonalField::Email => &mut personal.email,
            PersonalField::Phone => &mut personal.phone,
            PersonalField::Linkedin => &mut personal.linkedin,
            PersonalField::Website => &mut personal.website,
            PersonalField::Location => &mut personal.location,
            PersonalField::Headline => &mut personal.headline,
        };
        *slot = value;
    }
}

/// A `<section>.<field>` binding path. Only one level of nesting exists,
/// and only `personal` has bindable leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Personal(PersonalField),
}

impl FieldPath {
    /// Every bindable path, in form order.
    pub fn all() -> impl Iterator<Item = FieldPath> {
        PersonalField::ALL.into_iter().map(FieldPath::Personal)
    }

    pub fn section(self) -> &'static str {
        match self {
            FieldPath::Personal(_) => "personal",
        }
    }

    pub fn leaf(self) -> &'static str {
        match self {
            FieldPath::Personal(field) => field.key(),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (section, leaf) = s
            .split_once('.')
            .filter(|(section, leaf)| {
                !section.is_empty() && !leaf.is_empty() && !leaf.contains('.')
            })
            .ok_or_else(|| PathError::Malformed(s.to_string()))?;

        match section {
            "personal" => PersonalField::from_key(leaf)
                .map(FieldPath::Personal)
                .ok_or_else(|| PathError::UnknownField {
                    section: section.to_string(),
                    field: leaf.to_string(),
                }),
            other => Err(PathError::UnknownSection(other.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.leaf())
    }
}
