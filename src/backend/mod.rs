//! Typed client for the care-backend REST API.
//!
//! Every durable record the portal shows comes through here; the portal
//! itself stores nothing but the per-user clinic selection.

pub mod client;
pub mod error;

pub use client::BackendClient;
pub use error::BackendError;
