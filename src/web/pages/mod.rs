//! Portal page handlers. Each submodule owns one path family: the
//! handler, its form/query types, and the rendering for that page.

pub mod admin;
pub mod assessment;
pub mod clinic;
pub mod dashboard;
pub mod enrollment;
pub mod landing;
pub mod patient;
pub mod roster;

use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};

use crate::models::{ClinicSummary, UserProfile};
use crate::session::Session;
use crate::shell::{forced_destination, PathKind, SessionState};
use crate::web::render;
use crate::web::types::PortalContext;

/// Outcome of resolving a session against a protected path.
pub(crate) enum Gate {
    Allow {
        profile: UserProfile,
        clinic: Option<ClinicSummary>,
    },
    /// Degraded shell or a role-forced redirect; return it as-is.
    Denied(Response),
}

/// Resolve the caller's profile and apply role routing for `path`.
/// Every protected handler calls this first and returns early on
/// `Denied`.
pub(crate) async fn gate(ctx: &PortalContext, session: &Session, path: PathKind) -> Gate {
    match ctx.resolve_session(session).await {
        SessionState::Degraded { error } => {
            tracing::warn!(error = %error, "Profile fetch failed, rendering degraded shell");
            Gate::Denied(Html(render::degraded_page(path_title(&path))).into_response())
        }
        SessionState::Authenticated { profile, clinic } => {
            match forced_destination(&profile.role, &path) {
                Some(destination) => {
                    tracing::debug!(role = profile.role.as_str(), destination, "Role-forced redirect");
                    Gate::Denied(Redirect::temporary(destination).into_response())
                }
                None => Gate::Allow { profile, clinic },
            }
        }
    }
}

fn path_title(path: &PathKind) -> &'static str {
    match path {
        PathKind::Dashboard => "Dashboard",
        PathKind::Roster => "Active Patients",
        PathKind::PatientDetail => "Patient",
        PathKind::Assessment => "Initial Assessment",
        PathKind::Enrollment => "Enroll Patient",
        PathKind::Admin => "Admin",
        PathKind::ClinicSelect => "Clinic",
    }
}

/// Liveness probe used by deploy checks.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::config::APP_VERSION,
    }))
}
