//! Patient enrollment form.

use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};

use crate::forms::{EnrollmentForm, FormErrors};
use crate::models::{ClinicSummary, StaffOption};
use crate::session::Session;
use crate::shell::PathKind;
use crate::web::pages::{gate, Gate};
use crate::web::render;
use crate::web::types::PortalContext;

/// Staff lists the form selects from. Both fetches must succeed; a
/// form with an empty care-manager select could never validate.
struct StaffLists {
    care_managers: Vec<StaffOption>,
    consultants: Vec<StaffOption>,
}

async fn load_staff(ctx: &PortalContext, clinic_id: i64) -> Result<StaffLists, String> {
    let care_managers = ctx.backend.fetch_care_managers(clinic_id);
    let consultants = ctx.backend.fetch_consultants(clinic_id);
    match tokio::join!(care_managers, consultants) {
        (Ok(care_managers), Ok(consultants)) => Ok(StaffLists {
            care_managers,
            consultants,
        }),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, clinic_id, "Staff fetch failed");
            Err("Error fetching associated users".to_string())
        }
    }
}

pub async fn show(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Enrollment).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };
    let header = render::standard_header(&profile, clinic.as_ref());

    let body = match &clinic {
        Some(active) => match load_staff(&ctx, active.id).await {
            Ok(staff) => render_form(
                active,
                &staff,
                &EnrollmentForm::default(),
                &FormErrors::default(),
                None,
            ),
            Err(message) => render::error_region(&message),
        },
        None => render::notice_region("No clinic is assigned to this account."),
    };

    Html(render::page("Enroll Patient", header, body)).into_response()
}

pub async fn submit(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Form(form): Form<EnrollmentForm>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Enrollment).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };
    let header = render::standard_header(&profile, clinic.as_ref());

    let active = match &clinic {
        Some(active) => active,
        None => {
            let body = render::notice_region("No clinic is assigned to this account.");
            return Html(render::page("Enroll Patient", header, body)).into_response();
        }
    };

    let staff = match load_staff(&ctx, active.id).await {
        Ok(staff) => staff,
        Err(message) => {
            let body = render::error_region(&message);
            return Html(render::page("Enroll Patient", header, body)).into_response();
        }
    };

    let submission = match form.validate(active.id) {
        Ok(submission) => submission,
        Err(errors) => {
            let body = render_form(active, &staff, &form, &errors, None);
            return (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::page("Enroll Patient", header, body)),
            )
                .into_response();
        }
    };

    match ctx.backend.enroll_patient(&submission).await {
        Ok(()) => Redirect::to("/dashboard?enrolled=1").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, mrn = %submission.mrn, "Enrollment submission failed");
            let message = format!("Error enrolling patient: {}", e.user_message());
            let body = render_form(active, &staff, &form, &FormErrors::default(), Some(&message));
            Html(render::page("Enroll Patient", header, body)).into_response()
        }
    }
}

fn staff_select(name: &str, staff: &[StaffOption], selected: &str, placeholder: &str) -> String {
    let mut options = format!(r#"<option value="">{placeholder}</option>"#);
    for member in staff {
        let marker = if selected == member.id.to_string() {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{id}"{marker}>{label}</option>"#,
            id = member.id,
            label = render::escape_html(&member.name),
        ));
    }
    format!(r#"<select id="{name}" name="{name}">{options}</select>"#)
}

fn render_form(
    clinic: &ClinicSummary,
    staff: &StaffLists,
    form: &EnrollmentForm,
    errors: &FormErrors,
    submit_error: Option<&str>,
) -> String {
    let banner = match submit_error {
        Some(message) => render::banner(message),
        None => String::new(),
    };

    format!(
        r#"<h1>Enroll Patient</h1>
{banner}
<form class="panel" method="post" action="/enroll">
<label>Primary Clinic</label>
<input type="text" value="{clinic}" disabled>
<label for="enrollment_date">Enrollment Date</label>
<input type="date" id="enrollment_date" name="enrollment_date" value="{enrollment_date}">
<button class="btn btn-secondary" type="button" onclick="document.getElementById('enrollment_date').value = new Date().toISOString().slice(0, 10)">Today</button>
{enrollment_date_error}
<label for="mrn">MRN</label>
<input type="text" id="mrn" name="mrn" value="{mrn}">
{mrn_error}
<label for="care_manager_id">Care Manager</label>
{care_manager_select}
{care_manager_error}
<label for="psychiatric_consultant_id">Psychiatric Consultant (optional)</label>
{consultant_select}
<label for="first_name">First Name</label>
<input type="text" id="first_name" name="first_name" value="{first_name}">
{first_name_error}
<label for="last_name">Last Name</label>
<input type="text" id="last_name" name="last_name" value="{last_name}">
{last_name_error}
<label for="dob">Date of Birth</label>
<input type="date" id="dob" name="dob" value="{dob}">
{dob_error}
<p>
<a class="btn btn-secondary" href="/dashboard">Cancel</a>
<button class="btn btn-primary" type="submit">Enroll Patient</button>
</p>
</form>"#,
        clinic = render::escape_html(&clinic.name),
        enrollment_date = render::escape_html(&form.enrollment_date),
        enrollment_date_error = render::field_error(errors, "enrollment_date"),
        mrn = render::escape_html(&form.mrn),
        mrn_error = render::field_error(errors, "mrn"),
        care_manager_select = staff_select(
            "care_manager_id",
            &staff.care_managers,
            &form.care_manager_id,
            "Select a care manager",
        ),
        care_manager_error = render::field_error(errors, "care_manager_id"),
        consultant_select = staff_select(
            "psychiatric_consultant_id",
            &staff.consultants,
            &form.psychiatric_consultant_id,
            "Select a consultant",
        ),
        first_name = render::escape_html(&form.first_name),
        first_name_error = render::field_error(errors, "first_name"),
        last_name = render::escape_html(&form.last_name),
        last_name_error = render::field_error(errors, "last_name"),
        dob = render::escape_html(&form.dob),
        dob_error = render::field_error(errors, "dob"),
    )
}
