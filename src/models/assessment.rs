use serde::Serialize;

use crate::models::enums::SessionType;

/// POST body for `/api/patients`, built from a validated enrollment form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSubmission {
    pub mrn: String,
    pub care_manager_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychiatric_consultant_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// `MM/DD/YYYY`
    pub enrollment_date: String,
    /// `MM/DD/YYYY`
    pub dob: String,
    pub clinic_id: i64,
}

/// POST body for `/api/initial-assessment`, built from a validated
/// assessment form plus the session context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub patient_id: i64,
    pub clinic_id: i64,
    pub created_by: i64,
    /// `YYYY-MM-DD`
    pub contact_date: String,
    pub phq9_score: u32,
    pub gad7_score: u32,
    pub phq9_answers: Vec<u8>,
    pub gad7_answers: Vec<u8>,
    pub discuss_with_consultant: bool,
    pub psychiatric_consultant_id: Option<i64>,
    pub consultant_notes: String,
    pub session_type: SessionType,
    pub session_duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_serializes_camel_case() {
        let submission = EnrollmentSubmission {
            mrn: "MRN010".into(),
            care_manager_id: 4,
            psychiatric_consultant_id: Some(9),
            first_name: "Ada".into(),
            last_name: "Nguyen".into(),
            enrollment_date: "06/01/2025".into(),
            dob: "02/03/1990".into(),
            clinic_id: 3,
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["mrn"], "MRN010");
        assert_eq!(value["careManagerId"], 4);
        assert_eq!(value["psychiatricConsultantId"], 9);
        assert_eq!(value["enrollmentDate"], "06/01/2025");
        assert_eq!(value["clinicId"], 3);
    }

    #[test]
    fn enrollment_omits_absent_consultant() {
        let submission = EnrollmentSubmission {
            mrn: "MRN011".into(),
            care_manager_id: 4,
            psychiatric_consultant_id: None,
            first_name: "B".into(),
            last_name: "C".into(),
            enrollment_date: "06/01/2025".into(),
            dob: "02/03/1990".into(),
            clinic_id: 3,
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert!(value.get("psychiatricConsultantId").is_none());
    }

    #[test]
    fn assessment_serializes_scores_and_session() {
        let submission = AssessmentSubmission {
            patient_id: 9,
            clinic_id: 3,
            created_by: 42,
            contact_date: "2025-06-15".into(),
            phq9_score: 13,
            gad7_score: 7,
            phq9_answers: vec![0, 1, 2, 3, 1, 0, 2, 1, 3],
            gad7_answers: vec![1, 1, 1, 1, 1, 1, 1],
            discuss_with_consultant: true,
            psychiatric_consultant_id: Some(5),
            consultant_notes: "Flagging sleep disruption.".into(),
            session_type: SessionType::ByPhone,
            session_duration: 30,
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["patientId"], 9);
        assert_eq!(value["phq9Score"], 13);
        assert_eq!(value["gad7Answers"].as_array().unwrap().len(), 7);
        assert_eq!(value["sessionType"], "by_phone");
        assert_eq!(value["discussWithConsultant"], true);
        assert_eq!(value["sessionDuration"], 30);
    }
}
