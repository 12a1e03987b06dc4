//! Cohort entity
//!
//! A cohort is one running instance of a program that students enroll in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::nullable::{self, Nullable};
use crate::models::validation::{
    optional_text, require_slug, require_text, ValidationError, ValidationResult,
};
use crate::store::ObjectId;

// == Constants ==
/// Maximum length of a cohort name
pub const MAX_COHORT_NAME_LENGTH: usize = 120;

/// Maximum length of a staff name (program manager, lead teacher)
pub const MAX_STAFF_NAME_LENGTH: usize = 80;

/// Hours assigned to a cohort when none are given
pub const DEFAULT_TOTAL_HOURS: u32 = 360;

fn default_total_hours() -> u32 {
    DEFAULT_TOTAL_HOURS
}

// == Enums ==
/// Program taught in a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "Web Dev")]
    WebDev,
    #[serde(rename = "UX/UI")]
    UxUi,
    #[serde(rename = "Data Analytics")]
    DataAnalytics,
    #[serde(rename = "Cybersecurity")]
    Cybersecurity,
}

/// Schedule format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
}

/// Campus hosting the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Campus {
    Madrid,
    Barcelona,
    Miami,
    Paris,
    Berlin,
    Amsterdam,
    Lisbon,
    Remote,
}

// == Cohort Fields ==
/// Every caller-supplied cohort field. Doubles as the create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort_slug: Option<String>,
    pub cohort_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<Campus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub in_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_teacher: Option<String>,
    #[serde(default = "default_total_hours")]
    pub total_hours: u32,
}

impl CohortFields {
    /// Minimal cohort with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            cohort_slug: None,
            cohort_name: name.into(),
            program: None,
            format: None,
            campus: None,
            start_date: None,
            end_date: None,
            in_progress: false,
            program_manager: None,
            lead_teacher: None,
            total_hours: DEFAULT_TOTAL_HOURS,
        }
    }

    /// Checks every field before the cohort is stored.
    pub fn validate(&self) -> ValidationResult {
        if let Some(slug) = &self.cohort_slug {
            require_slug("cohortSlug", slug)?;
        }
        require_text("cohortName", &self.cohort_name, MAX_COHORT_NAME_LENGTH)?;
        optional_text(
            "programManager",
            self.program_manager.as_deref(),
            MAX_STAFF_NAME_LENGTH,
        )?;
        optional_text(
            "leadTeacher",
            self.lead_teacher.as_deref(),
            MAX_STAFF_NAME_LENGTH,
        )?;
        check_total_hours(self.total_hours)?;
        check_date_order(self.start_date, self.end_date)
    }
}

// == Cohort ==
/// A stored cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: CohortFields,
}

// == Cohort Patch ==
/// Partial update: only the fields present are changed. Optional fields
/// sent as `null` are cleared; `null` for a required or defaulted field is
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortPatch {
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub cohort_slug: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub program: Nullable<Program>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub format: Nullable<Format>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub campus: Nullable<Campus>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Nullable<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Nullable<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<bool>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub program_manager: Nullable<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub lead_teacher: Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<u32>,
}

impl CohortPatch {
    /// Checks the supplied fields on their own.
    pub fn validate(&self) -> ValidationResult {
        if let Some(Some(slug)) = &self.cohort_slug {
            require_slug("cohortSlug", slug)?;
        }
        optional_text(
            "cohortName",
            self.cohort_name.as_deref(),
            MAX_COHORT_NAME_LENGTH,
        )?;
        optional_text(
            "programManager",
            self.program_manager.as_ref().and_then(|v| v.as_deref()),
            MAX_STAFF_NAME_LENGTH,
        )?;
        optional_text(
            "leadTeacher",
            self.lead_teacher.as_ref().and_then(|v| v.as_deref()),
            MAX_STAFF_NAME_LENGTH,
        )?;
        if let Some(hours) = self.total_hours {
            check_total_hours(hours)?;
        }
        Ok(())
    }

    /// Checks the rules that span fields against the cohort the patch will
    /// be merged into.
    pub fn validate_against(&self, current: &CohortFields) -> ValidationResult {
        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        check_date_order(start, end)
    }
}

fn check_total_hours(hours: u32) -> ValidationResult {
    if hours == 0 {
        return Err(ValidationError::OutOfRange {
            field: "totalHours",
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn check_date_order(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> ValidationResult {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::OutOfRange {
            field: "endDate",
            reason: "must not precede startDate",
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_defaults() {
        let fields: CohortFields = serde_json::from_value(json!({"cohortName": "Web Dev Jan"})).unwrap();
        assert_eq!(fields, CohortFields::named("Web Dev Jan"));
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_fields_full_payload() {
        let fields: CohortFields = serde_json::from_value(json!({
            "cohortSlug": "wd-ft-mad-2024-01",
            "cohortName": "WD FT MAD 2024 01",
            "program": "Web Dev",
            "format": "Full Time",
            "campus": "Madrid",
            "startDate": "2024-01-08T00:00:00Z",
            "endDate": "2024-03-29T00:00:00Z",
            "inProgress": true,
            "programManager": "Sally Daher",
            "leadTeacher": "Florian Aube",
            "totalHours": 400
        }))
        .unwrap();

        assert_eq!(fields.program, Some(Program::WebDev));
        assert_eq!(fields.format, Some(Format::FullTime));
        assert_eq!(fields.campus, Some(Campus::Madrid));
        assert_eq!(fields.total_hours, 400);
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_unknown_program_is_rejected() {
        let result = serde_json::from_value::<CohortFields>(json!({
            "cohortName": "x",
            "program": "Basket Weaving"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut fields = CohortFields::named("  ");
        assert!(fields.validate().is_err());

        fields = CohortFields::named("ok");
        fields.total_hours = 0;
        assert!(fields.validate().is_err());

        fields = CohortFields::named("ok");
        fields.start_date = Some("2024-03-01T00:00:00Z".parse().unwrap());
        fields.end_date = Some("2024-01-01T00:00:00Z".parse().unwrap());
        assert!(matches!(
            fields.validate(),
            Err(ValidationError::OutOfRange { field: "endDate", .. })
        ));
    }

    #[test]
    fn test_cohort_serializes_flat_with_id() {
        let cohort = Cohort {
            id: "65a1b2c3d4e5f60718293a4b".parse().unwrap(),
            fields: CohortFields::named("Web Dev Jan"),
        };
        let value = serde_json::to_value(&cohort).unwrap();
        assert_eq!(value["_id"], "65a1b2c3d4e5f60718293a4b");
        assert_eq!(value["cohortName"], "Web Dev Jan");
        assert_eq!(value["totalHours"], 360);
        assert!(value.get("program").is_none());

        let back: Cohort = serde_json::from_value(value).unwrap();
        assert_eq!(back, cohort);
    }

    #[test]
    fn test_patch_serializes_only_supplied_fields() {
        let patch: CohortPatch = serde_json::from_value(json!({"campus": "Paris"})).unwrap();
        assert!(patch.validate().is_ok());

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"campus": "Paris"}));
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let patch: CohortPatch = serde_json::from_value(json!({
            "campus": null,
            "leadTeacher": null,
            "cohortName": null
        }))
        .unwrap();
        assert_eq!(patch.campus, Some(None));
        assert_eq!(patch.lead_teacher, Some(None));
        assert_eq!(patch.cohort_name, None);
        assert!(patch.validate().is_ok());

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"campus": null, "leadTeacher": null}));
    }

    #[test]
    fn test_patch_date_order_uses_stored_dates() {
        let mut current = CohortFields::named("Web Dev Mar");
        current.start_date = Some("2024-03-01T00:00:00Z".parse().unwrap());
        current.end_date = Some("2024-06-01T00:00:00Z".parse().unwrap());

        let early_end = CohortPatch {
            end_date: Some(Some("2024-01-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(early_end.validate().is_ok());
        assert!(matches!(
            early_end.validate_against(&current),
            Err(ValidationError::OutOfRange { field: "endDate", .. })
        ));

        let late_start = CohortPatch {
            start_date: Some(Some("2024-07-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(late_start.validate_against(&current).is_err());

        // Clearing one side removes the constraint
        let cleared = CohortPatch {
            start_date: Some(None),
            end_date: Some(Some("2024-01-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(cleared.validate_against(&current).is_ok());

        let moved = CohortPatch {
            start_date: Some(Some("2024-01-01T00:00:00Z".parse().unwrap())),
            end_date: Some(Some("2024-02-01T00:00:00Z".parse().unwrap())),
            ..Default::default()
        };
        assert!(moved.validate_against(&current).is_ok());
    }

    #[test]
    fn test_patch_validation() {
        let patch = CohortPatch {
            cohort_name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = CohortPatch {
            total_hours: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        assert!(CohortPatch::default().validate().is_ok());
    }
}
