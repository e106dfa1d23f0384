//! View models mirroring care-backend records.
//!
//! The backend speaks camelCase JSON; structs here use snake_case fields
//! with serde rename rules. Nothing in this module talks to the network;
//! these are plain data carriers shared by the backend client, the roster
//! engine, the forms, and the page renderers.

pub mod assessment;
pub mod clinic;
pub mod enums;
pub mod error;
pub mod patient;
pub mod user;

pub use assessment::{AssessmentSubmission, EnrollmentSubmission};
pub use clinic::{ClinicMetrics, ClinicSummary};
pub use enums::{AdminTab, RosterSortKey, SessionType, SortDirection};
pub use error::ModelError;
pub use patient::{PatientDetail, Provider, RosterPatient, CARE_MANAGER_TYPE, ENROLLED_STATUS};
pub use user::{Role, StaffOption, UserProfile};
