use thiserror::Error;

/// Errors raised while mapping wire values into typed models.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
