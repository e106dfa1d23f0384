use serde::{Deserialize, Serialize};

/// Provider type tag the backend uses for behavioral-health care managers.
pub const CARE_MANAGER_TYPE: &str = "BHCM";

/// Patient status code for enrolled patients.
pub const ENROLLED_STATUS: &str = "E";

/// One row of the active-patient roster, from
/// `GET /api/patients/active?clinicId={id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPatient {
    pub id: i64,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub enrollment_date: String,
    #[serde(default)]
    pub care_manager: String,
}

/// Full patient record behind the detail page, from `GET /api/patients/{id}`.
///
/// Score fields are absent until the first assessment is recorded, and
/// several identity fields arrive empty for partially migrated charts, so
/// everything optional defaults rather than failing the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetail {
    pub patient_id: i64,
    #[serde(default)]
    pub clinic_id: Option<i64>,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub enrollment_date: String,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub phq9_first: Option<i64>,
    #[serde(default)]
    pub phq9_last: Option<i64>,
    #[serde(default)]
    pub gad7_first: Option<i64>,
    #[serde(default)]
    pub gad7_last: Option<i64>,
    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl PatientDetail {
    /// The BHCM-typed provider, when one is assigned.
    pub fn care_manager(&self) -> Option<&Provider> {
        self.providers
            .iter()
            .find(|p| p.provider_type == CARE_MANAGER_TYPE)
    }

    /// The initial assessment is offered only for enrolled patients that
    /// belong to a clinic.
    pub fn assessment_eligible(&self) -> bool {
        self.status == ENROLLED_STATUS
            && self
                .clinic_name
                .as_deref()
                .map(|name| !name.is_empty())
                .unwrap_or(false)
    }
}

/// Care-team member attached to a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default)]
    pub id: Option<i64>,
    pub provider_type: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service_begin_date: String,
    #[serde(default)]
    pub service_end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_json(status: &str, clinic_name: &str) -> String {
        format!(
            r#"{{
                "patientId": 9,
                "clinicId": 3,
                "mrn": "MRN009",
                "firstName": "Jordan",
                "lastName": "Lee",
                "dob": "04/12/1988",
                "enrollmentDate": "01/05/2025",
                "clinicName": "{clinic_name}",
                "status": "{status}",
                "phq9First": 14,
                "phq9Last": 8,
                "providers": [
                    {{
                        "id": 11,
                        "providerType": "BHCM",
                        "name": "Casey Morgan",
                        "phone": "555-0100",
                        "email": "cm@example.org",
                        "serviceBeginDate": "01/05/2025"
                    }},
                    {{
                        "providerType": "PCP",
                        "name": "Dr. Reyes"
                    }}
                ]
            }}"#
        )
    }

    #[test]
    fn roster_patient_deserializes_camel_case() {
        let json = r#"{
            "id": 1,
            "mrn": "MRN001",
            "firstName": "Ada",
            "lastName": "Nguyen",
            "dob": "02/03/1990",
            "enrollmentDate": "05/20/2025",
            "careManager": "Casey Morgan"
        }"#;
        let row: RosterPatient = serde_json::from_str(json).unwrap();
        assert_eq!(row.first_name, "Ada");
        assert_eq!(row.care_manager, "Casey Morgan");
    }

    #[test]
    fn care_manager_picks_bhcm_provider() {
        let detail: PatientDetail = serde_json::from_str(&detail_json("E", "Northside")).unwrap();
        let cm = detail.care_manager().unwrap();
        assert_eq!(cm.name, "Casey Morgan");
        assert_eq!(cm.provider_type, "BHCM");
    }

    #[test]
    fn assessment_requires_enrolled_status_and_clinic() {
        let eligible: PatientDetail =
            serde_json::from_str(&detail_json("E", "Northside")).unwrap();
        assert!(eligible.assessment_eligible());

        let discharged: PatientDetail =
            serde_json::from_str(&detail_json("D", "Northside")).unwrap();
        assert!(!discharged.assessment_eligible());

        let no_clinic: PatientDetail = serde_json::from_str(&detail_json("E", "")).unwrap();
        assert!(!no_clinic.assessment_eligible());
    }

    #[test]
    fn detail_tolerates_sparse_records() {
        let json = r#"{"patientId": 2, "mrn": "MRN002", "firstName": "B", "lastName": "C"}"#;
        let detail: PatientDetail = serde_json::from_str(json).unwrap();
        assert!(detail.phq9_first.is_none());
        assert!(detail.gad7_last.is_none());
        assert!(detail.providers.is_empty());
        assert!(detail.care_manager().is_none());
        assert!(!detail.assessment_eligible());
    }
}
