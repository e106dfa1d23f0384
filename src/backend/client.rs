use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::BackendError;
use crate::config::{self, PortalConfig};
use crate::models::{
    AssessmentSubmission, ClinicMetrics, EnrollmentSubmission, PatientDetail, RosterPatient,
    StaffOption, UserProfile,
};

/// HTTP client for the care-backend REST API.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl BackendClient {
    /// Create a new BackendClient pointing at a backend instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(&config.backend_url, config::BACKEND_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/users/{id}`, authorized with the caller's bearer token.
    pub async fn fetch_user(&self, id: i64, token: &str) -> Result<UserProfile, BackendError> {
        let url = format!("{}/api/users/{}", self.base_url, id);
        self.request_json(self.client.get(&url).bearer_auth(token))
            .await
    }

    /// `GET /api/patients/active?clinicId={id}`.
    pub async fn fetch_active_patients(
        &self,
        clinic_id: i64,
    ) -> Result<Vec<RosterPatient>, BackendError> {
        let url = format!(
            "{}/api/patients/active?clinicId={}",
            self.base_url, clinic_id
        );
        self.request_json(self.client.get(&url)).await
    }

    /// `GET /api/patients/{id}`.
    pub async fn fetch_patient(&self, id: i64) -> Result<PatientDetail, BackendError> {
        let url = format!("{}/api/patients/{}", self.base_url, id);
        self.request_json(self.client.get(&url)).await
    }

    /// `GET /api/patients/care-managers?clinicId={id}`.
    pub async fn fetch_care_managers(
        &self,
        clinic_id: i64,
    ) -> Result<Vec<StaffOption>, BackendError> {
        let url = format!(
            "{}/api/patients/care-managers?clinicId={}",
            self.base_url, clinic_id
        );
        self.request_json(self.client.get(&url)).await
    }

    /// `GET /api/patients/consultants?clinicId={id}`.
    pub async fn fetch_consultants(
        &self,
        clinic_id: i64,
    ) -> Result<Vec<StaffOption>, BackendError> {
        let url = format!(
            "{}/api/patients/consultants?clinicId={}",
            self.base_url, clinic_id
        );
        self.request_json(self.client.get(&url)).await
    }

    /// `GET /api/clinics/{id}/data`.
    pub async fn fetch_clinic_metrics(
        &self,
        clinic_id: i64,
    ) -> Result<ClinicMetrics, BackendError> {
        let url = format!("{}/api/clinics/{}/data", self.base_url, clinic_id);
        self.request_json(self.client.get(&url)).await
    }

    /// `POST /api/patients`.
    pub async fn enroll_patient(
        &self,
        submission: &EnrollmentSubmission,
    ) -> Result<(), BackendError> {
        let url = format!("{}/api/patients", self.base_url);
        self.post_json(&url, submission).await
    }

    /// `POST /api/initial-assessment`.
    pub async fn submit_assessment(
        &self,
        submission: &AssessmentSubmission,
    ) -> Result<(), BackendError> {
        let url = format!("{}/api/initial-assessment", self.base_url);
        self.post_json(&url, submission).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<(), BackendError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_connect() {
            BackendError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            BackendError::Transport(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

/// Build the rejection error for a non-success response: the backend's
/// JSON `{error}` message when present, the status text otherwise.
async fn rejection(response: reqwest::Response) -> BackendError {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string();
    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    BackendError::Rejected {
        status: status.as_u16(),
        message,
    }
}
