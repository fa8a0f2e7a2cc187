//! Caller-side validation of drafts and patches.
//!
//! The store accepts whatever it is given; callers run these checks first and
//! never issue a store call for input that fails them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::types::{AssetDraft, AssetPatch};

/// Date layout used for `installDate` and `lastMaintenance`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single rejected field, keyed by its JSON name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation error: {}", join_messages(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn join_messages(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check every field of a create draft.
pub fn validate_draft(draft: &AssetDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_name(&draft.name, &mut errors);
    check_capacity(draft.capacity, &mut errors);
    check_location(&draft.location, &mut errors);
    check_efficiency(draft.efficiency, &mut errors);
    check_date(
        "installDate",
        &draft.install_date,
        "Install date is required",
        &mut errors,
    );
    check_date(
        "lastMaintenance",
        &draft.last_maintenance,
        "Last maintenance date is required",
        &mut errors,
    );
    errors
}

/// Check only the fields a patch supplies. A patch supplying nothing is
/// rejected.
pub fn validate_patch(patch: &AssetPatch) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if patch.is_empty() {
        errors.push(FieldError::new(
            "patch",
            "At least one field must be supplied",
        ));
        return errors;
    }
    if let Some(name) = &patch.name {
        check_name(name, &mut errors);
    }
    if let Some(capacity) = patch.capacity {
        check_capacity(capacity, &mut errors);
    }
    if let Some(location) = &patch.location {
        check_location(location, &mut errors);
    }
    if let Some(efficiency) = patch.efficiency {
        check_efficiency(efficiency, &mut errors);
    }
    if let Some(date) = &patch.install_date {
        check_date("installDate", date, "Install date is required", &mut errors);
    }
    if let Some(date) = &patch.last_maintenance {
        check_date(
            "lastMaintenance",
            date,
            "Last maintenance date is required",
            &mut errors,
        );
    }
    errors
}

pub fn ensure_valid_draft(draft: &AssetDraft) -> Result<(), ValidationError> {
    into_result(validate_draft(draft))
}

pub fn ensure_valid_patch(patch: &AssetPatch) -> Result<(), ValidationError> {
    into_result(validate_patch(patch))
}

fn into_result(fields: Vec<FieldError>) -> Result<(), ValidationError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields })
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
}

fn check_capacity(capacity: f64, errors: &mut Vec<FieldError>) {
    if !capacity.is_finite() || capacity <= 0.0 {
        errors.push(FieldError::new(
            "capacity",
            "Capacity must be greater than 0",
        ));
    }
}

fn check_location(location: &str, errors: &mut Vec<FieldError>) {
    if location.trim().is_empty() {
        errors.push(FieldError::new("location", "Location is required"));
    }
}

fn check_efficiency(efficiency: f64, errors: &mut Vec<FieldError>) {
    if !(0.0..=100.0).contains(&efficiency) {
        errors.push(FieldError::new(
            "efficiency",
            "Efficiency must be between 0 and 100",
        ));
    }
}

fn check_date(
    field: &'static str,
    value: &str,
    missing_message: &str,
    errors: &mut Vec<FieldError>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, missing_message));
        return;
    }
    // Dates sort as strings, so only the zero-padded canonical form is accepted.
    let canonical = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .is_ok_and(|date| date.format(DATE_FORMAT).to_string() == value);
    if !canonical {
        errors.push(FieldError::new(
            field,
            format!("{field} must be a YYYY-MM-DD date"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::draft;

    #[test]
    fn well_formed_draft_passes() {
        assert!(validate_draft(&draft("North Ridge")).is_empty());
    }

    #[test]
    fn draft_reports_every_failing_field() {
        let mut bad = draft("  ");
        bad.capacity = 0.0;
        bad.location = String::new();
        bad.efficiency = 100.5;
        bad.install_date = String::new();
        bad.last_maintenance = "2024-02-30".to_string();

        let fields: Vec<&str> = validate_draft(&bad)
            .iter()
            .map(|error| error.field)
            .collect();

        assert_eq!(
            fields,
            vec![
                "name",
                "capacity",
                "location",
                "efficiency",
                "installDate",
                "lastMaintenance"
            ]
        );
    }

    #[test]
    fn efficiency_bounds_are_inclusive() {
        let mut low = draft("Edge");
        low.efficiency = 0.0;
        let mut high = draft("Edge");
        high.efficiency = 100.0;
        assert!(validate_draft(&low).is_empty());
        assert!(validate_draft(&high).is_empty());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut bad = draft("Edge");
        bad.capacity = f64::INFINITY;
        bad.efficiency = f64::NAN;
        assert_eq!(validate_draft(&bad).len(), 2);
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = AssetPatch {
            capacity: Some(-5.0),
            ..AssetPatch::default()
        };
        let err = ensure_valid_patch(&patch).expect_err("negative capacity");
        assert_eq!(err.fields.len(), 1);
        assert_eq!(
            err.to_string(),
            "Validation error: Capacity must be greater than 0"
        );
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = ensure_valid_patch(&AssetPatch::default()).expect_err("empty patch");
        assert_eq!(err.fields[0].field, "patch");
    }

    #[test]
    fn dates_must_be_zero_padded() {
        for value in ["2024-1-5", "2024-01-5", "2024-1-05", "+2024-01-05", " 2024-01-05"] {
            let mut bad = draft("Edge");
            bad.install_date = value.to_string();
            let errors = validate_draft(&bad);
            assert_eq!(errors.len(), 1, "{value}");
            assert_eq!(errors[0].field, "installDate");
        }

        let patch = AssetPatch {
            last_maintenance: Some("2024-9-1".to_string()),
            ..AssetPatch::default()
        };
        assert!(ensure_valid_patch(&patch).is_err());

        let mut good = draft("Edge");
        good.install_date = "2024-09-01".to_string();
        assert!(validate_draft(&good).is_empty());
    }
}
