//! Clinic switcher: stores the caller's selected clinic.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::session::Session;
use crate::shell::PathKind;
use crate::web::pages::{gate, Gate};
use crate::web::types::PortalContext;

#[derive(Debug, Deserialize)]
pub struct ClinicSelectForm {
    #[serde(default)]
    pub clinic_id: String,
}

/// `POST /clinic`. Ids outside the caller's clinic list are ignored;
/// either way the caller lands back on the dashboard.
pub async fn select(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Form(form): Form<ClinicSelectForm>,
) -> Response {
    let (profile, _clinic) = match gate(&ctx, &session, PathKind::ClinicSelect).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };

    let chosen = form
        .clinic_id
        .parse::<i64>()
        .ok()
        .and_then(|id| profile.clinics.iter().find(|c| c.id == id).cloned());

    match chosen {
        Some(clinic) => {
            tracing::debug!(user_id = profile.id, clinic_id = clinic.id, "Clinic switched");
            if let Ok(mut selections) = ctx.clinics.lock() {
                selections.select(profile.id, clinic);
            }
        }
        None => {
            tracing::debug!(
                user_id = profile.id,
                requested = %form.clinic_id,
                "Ignored clinic selection outside profile"
            );
        }
    }

    Redirect::to("/dashboard").into_response()
}
