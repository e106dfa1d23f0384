//! Server-side form decoding and validation.
//!
//! Each form validates into either a backend submission payload or a
//! [`FormErrors`] map of field name to message. Validation failure means
//! nothing is POSTed; the page re-renders with the entered values and the
//! per-field messages.

pub mod assessment;
pub mod enrollment;

pub use assessment::{AssessmentForm, ValidatedAssessment};
pub use enrollment::EnrollmentForm;

/// Field-keyed validation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(String, String)>,
}

impl FormErrors {
    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push((field.to_string(), message.to_string()));
    }

    /// First message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_keep_field_order_and_lookup() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());

        errors.push("mrn", "MRN is required");
        errors.push("dob", "Date of Birth is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("mrn"), Some("MRN is required"));
        assert_eq!(errors.get("first_name"), None);

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["mrn", "dob"]);
    }
}
