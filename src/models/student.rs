//! Student entity
//!
//! Students reference their cohort by id. On reads the reference can be
//! populated into the full cohort record.

use serde::{Deserialize, Serialize};

use crate::models::cohort::{Cohort, Program};
use crate::models::nullable::{self, Nullable};
use crate::models::validation::{
    optional_text, require_email, require_text, ValidationError, ValidationResult,
};
use crate::store::ObjectId;

// == Constants ==
/// Maximum length of first and last names
pub const MAX_PERSON_NAME_LENGTH: usize = 80;

/// Maximum length of free-text fields (background, urls)
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Avatar used when a student has no image
pub const DEFAULT_IMAGE: &str = "https://i.imgur.com/r8bo8u7.png";

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

/// Spoken language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Portuguese,
    Dutch,
    Other,
}

// == Student Fields ==
/// Every caller-supplied student field. `C` is the cohort reference: an
/// [`ObjectId`] as stored, or a [`Cohort`] once populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields<C = ObjectId> {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    #[serde(default)]
    pub background: String,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "Option::default")]
    pub cohort: Option<C>,
    #[serde(default)]
    pub projects: Vec<String>,
}

impl StudentFields {
    /// Minimal student with the required fields only.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            linkedin_url: String::new(),
            languages: Vec::new(),
            program: None,
            background: String::new(),
            image: default_image(),
            cohort: None,
            projects: Vec::new(),
        }
    }

    /// Checks every field before the student is stored.
    pub fn validate(&self) -> ValidationResult {
        require_text("firstName", &self.first_name, MAX_PERSON_NAME_LENGTH)?;
        require_text("lastName", &self.last_name, MAX_PERSON_NAME_LENGTH)?;
        require_email("email", &self.email)?;
        optional_text("phone", self.phone.as_deref(), MAX_PERSON_NAME_LENGTH)?;
        check_free_text(&self.linkedin_url, &self.background, &self.image)
    }
}

impl<C> StudentFields<C> {
    /// Swaps the cohort reference, keeping every other field.
    pub fn with_cohort<D>(self, cohort: Option<D>) -> StudentFields<D> {
        StudentFields {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            linkedin_url: self.linkedin_url,
            languages: self.languages,
            program: self.program,
            background: self.background,
            image: self.image,
            cohort,
            projects: self.projects,
        }
    }
}

// == Student ==
/// A stored student. `Student<Cohort>` is the populated form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student<C = ObjectId> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: StudentFields<C>,
}

/// Student whose cohort reference has been resolved. `cohort` is `None`
/// when the reference is missing or points at a deleted cohort.
pub type PopulatedStudent = Student<Cohort>;

impl Student {
    /// The referenced cohort id, if any.
    pub fn cohort_id(&self) -> Option<ObjectId> {
        self.fields.cohort
    }

    /// Replaces the cohort reference with the resolved record.
    pub fn populate(self, cohort: Option<Cohort>) -> PopulatedStudent {
        Student {
            id: self.id,
            fields: self.fields.with_cohort(cohort),
        }
    }
}

// == Student Patch ==
/// Partial update: only the fields present are changed. `phone`, `program`
/// and `cohort` sent as `null` are cleared; `null` for any other field is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub program: Nullable<Program>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub cohort: Nullable<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
}

impl StudentPatch {
    /// Checks the supplied fields.
    pub fn validate(&self) -> ValidationResult {
        optional_text(
            "firstName",
            self.first_name.as_deref(),
            MAX_PERSON_NAME_LENGTH,
        )?;
        optional_text("lastName", self.last_name.as_deref(), MAX_PERSON_NAME_LENGTH)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        optional_text(
            "phone",
            self.phone.as_ref().and_then(|v| v.as_deref()),
            MAX_PERSON_NAME_LENGTH,
        )?;
        check_free_text(
            self.linkedin_url.as_deref().unwrap_or_default(),
            self.background.as_deref().unwrap_or_default(),
            self.image.as_deref().unwrap_or_default(),
        )
    }
}

fn check_free_text(linkedin_url: &str, background: &str, image: &str) -> ValidationResult {
    for (field, value) in [
        ("linkedinUrl", linkedin_url),
        ("background", background),
        ("image", image),
    ] {
        if value.chars().count() > MAX_TEXT_LENGTH {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_TEXT_LENGTH,
            });
        }
    }
    Ok(())
}
