use thiserror::Error;

/// Errors from talking to the care backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Could not reach the care backend at {0}")]
    Connection(String),

    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to parse backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Text shown inside a form-level banner after a failed submission:
    /// the backend's own error message when it sent one, the full error
    /// otherwise.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
