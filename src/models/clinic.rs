use serde::{Deserialize, Serialize};

/// Clinic as listed on a user profile or in the admin clinic list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicSummary {
    pub id: i64,
    pub name: String,
}

/// Aggregate numbers behind the dashboard cards, from
/// `GET /api/clinics/{id}/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicMetrics {
    pub total_patients: i64,
    pub active_patients: i64,
    pub total_minutes_tracked: i64,
    pub average_minutes_per_patient: f64,
    pub new_patients: i64,
    pub follow_up_appointments: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_deserialize_camel_case() {
        let json = r#"{
            "totalPatients": 120,
            "activePatients": 85,
            "totalMinutesTracked": 4230,
            "averageMinutesPerPatient": 49.8,
            "newPatients": 12,
            "followUpAppointments": 31
        }"#;
        let metrics: ClinicMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.total_patients, 120);
        assert_eq!(metrics.active_patients, 85);
        assert_eq!(metrics.follow_up_appointments, 31);
        assert!((metrics.average_minutes_per_patient - 49.8).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_accept_integral_averages() {
        let json = r#"{
            "totalPatients": 1,
            "activePatients": 1,
            "totalMinutesTracked": 30,
            "averageMinutesPerPatient": 30,
            "newPatients": 0,
            "followUpAppointments": 0
        }"#;
        let metrics: ClinicMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.average_minutes_per_patient, 30.0);
    }
}
