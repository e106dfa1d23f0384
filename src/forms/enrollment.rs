use chrono::NaiveDate;
use serde::Deserialize;

use crate::forms::FormErrors;
use crate::models::EnrollmentSubmission;

/// Raw enrollment form fields as submitted. Everything arrives as a
/// string so a failed validation can re-render exactly what was typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentForm {
    #[serde(default)]
    pub mrn: String,
    #[serde(default)]
    pub care_manager_id: String,
    #[serde(default)]
    pub psychiatric_consultant_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub enrollment_date: String,
    #[serde(default)]
    pub dob: String,
}

fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl EnrollmentForm {
    /// Validate and build the backend payload for the given clinic.
    /// Date inputs arrive as `YYYY-MM-DD` and are reformatted to the
    /// backend's `MM/DD/YYYY`.
    pub fn validate(&self, clinic_id: i64) -> Result<EnrollmentSubmission, FormErrors> {
        let mut errors = FormErrors::default();

        if self.mrn.is_empty() {
            errors.push("mrn", "MRN is required");
        }

        let care_manager_id: Option<i64> = self.care_manager_id.parse().ok();
        if care_manager_id.is_none() {
            errors.push("care_manager_id", "Care Manager is required");
        }

        if self.first_name.is_empty() {
            errors.push("first_name", "First Name is required");
        }
        if self.last_name.is_empty() {
            errors.push("last_name", "Last Name is required");
        }

        let enrollment_date = parse_input_date(&self.enrollment_date);
        if enrollment_date.is_none() {
            errors.push("enrollment_date", "Enrollment Date is required");
        }
        let dob = parse_input_date(&self.dob);
        if dob.is_none() {
            errors.push("dob", "Date of Birth is required");
        }

        match (care_manager_id, enrollment_date, dob) {
            (Some(care_manager_id), Some(enrollment_date), Some(dob)) if errors.is_empty() => {
                Ok(EnrollmentSubmission {
                    mrn: self.mrn.clone(),
                    care_manager_id,
                    psychiatric_consultant_id: self.psychiatric_consultant_id.parse().ok(),
                    first_name: self.first_name.clone(),
                    last_name: self.last_name.clone(),
                    enrollment_date: enrollment_date.format("%m/%d/%Y").to_string(),
                    dob: dob.format("%m/%d/%Y").to_string(),
                    clinic_id,
                })
            }
            _ => Err(errors),
        }
    }
}
