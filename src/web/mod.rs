//! Browser-facing web layer.
//!
//! An axum router serves every portal page as server-rendered HTML.
//! Guarded routes pass through the session middleware, resolve the user
//! profile per request, and fetch their view data from the care backend
//! before rendering.

pub mod middleware;
pub mod pages;
pub mod render;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_router;
pub use server::{start_portal_server, start_portal_server_on, PortalServer};
pub use types::PortalContext;
