//! Read-only patient detail dashboard.

use axum::{
    extract::Path,
    response::{Html, IntoResponse, Response},
    Extension,
};
use chrono::{Datelike, NaiveDate, Utc};

use crate::models::PatientDetail;
use crate::scores::Instrument;
use crate::session::Session;
use crate::shell::PathKind;
use crate::web::pages::{gate, Gate};
use crate::web::render;
use crate::web::types::PortalContext;

pub async fn show(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::PatientDetail).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };

    let body = match ctx.backend.fetch_patient(id).await {
        Ok(detail) => render_detail(&detail, Utc::now().date_naive()),
        Err(e) => {
            tracing::warn!(error = %e, patient_id = id, "Patient fetch failed");
            render::error_region("Failed to fetch patient data")
        }
    };

    let header = render::standard_header(&profile, clinic.as_ref());
    Html(render::page("Patient", header, body)).into_response()
}

/// Calendar-year age, or "?" when the date of birth does not parse.
fn age_display(dob: &str, today: NaiveDate) -> String {
    match NaiveDate::parse_from_str(dob, "%m/%d/%Y") {
        Ok(born) => (today.year() - born.year()).to_string(),
        Err(_) => "?".to_string(),
    }
}

fn measure_display(score: Option<i64>, instrument: Instrument) -> String {
    match score.and_then(|s| u32::try_from(s).ok()) {
        Some(s) => format!(
            "{s}/{max} ({severity})",
            max = instrument.max_score(),
            severity = instrument.severity(s),
        ),
        None => "Not recorded".to_string(),
    }
}

fn providers_table(detail: &PatientDetail) -> String {
    if detail.providers.is_empty() {
        return "<p>No providers on record</p>".to_string();
    }
    let rows: String = detail
        .providers
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{ptype}</td><td>{name}</td><td>{phone}</td><td>{email}</td><td>{begin}</td><td>{end}</td></tr>"#,
                ptype = render::escape_html(&p.provider_type),
                name = render::escape_html(&p.name),
                phone = render::escape_html(&p.phone),
                email = render::escape_html(&p.email),
                begin = render::escape_html(&p.service_begin_date),
                end = render::escape_html(p.service_end_date.as_deref().unwrap_or("N/A")),
            )
        })
        .collect();
    format!(
        r#"<table><thead><tr><th>Type</th><th>Name</th><th>Phone</th><th>Email</th><th>Service Begin</th><th>Service End</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

fn render_detail(detail: &PatientDetail, today: NaiveDate) -> String {
    let assessment_link = if detail.assessment_eligible() {
        format!(
            r#"<a class="btn btn-primary" href="/patients/{}/assessment">Start Initial Assessment</a>"#,
            detail.patient_id
        )
    } else {
        String::new()
    };

    let clinic_name = detail.clinic_name.as_deref().unwrap_or("N/A");
    let care_manager = detail
        .care_manager()
        .map(|p| render::escape_html(&p.name))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"<h1>{last}, {first} | Status: {status}</h1>
<p>Patient ID: {pid} &middot; MRN: {mrn}</p>
<p>Age: {age} | DOB: {dob}</p>
{assessment_link}
<div class="columns">
<div>
<h2>Patient Information</h2>
<div class="card">
<p>Primary Clinic: {clinic}</p>
<p>MRN: {mrn}</p>
<p>Enrollment Date: {enrolled}</p>
<p>Patient ID: {pid}</p>
<p>Care Manager: {care_manager}</p>
<p>Last Name: {last} &middot; First Name: {first} &middot; DOB: {dob}</p>
</div>
<h2>Current Providers</h2>
{providers}
<h2>Clinical Measures</h2>
<div class="card">
<p>PHQ-9 First: {phq9_first}</p>
<p>PHQ-9 Last: {phq9_last}</p>
<p>GAD-7 First: {gad7_first}</p>
<p>GAD-7 Last: {gad7_last}</p>
</div>
<h2>Treatment History</h2>
<p>Treatment history information not available.</p>
</div>
<div>
<div class="card"><h2>Customize Dashboard View</h2>
<label><input type="checkbox" checked> Patient Information</label>
<label><input type="checkbox" checked> Clinical Measures</label>
<label><input type="checkbox"> Treatment History</label>
</div>
<div class="card"><h2>Reminders</h2><p>No reminders</p></div>
<div class="card"><h2>Last Contact</h2><p>Not recorded</p></div>
<div class="card"><h2>Flags</h2><p>None</p></div>
</div>
</div>"#,
        last = render::escape_html(&detail.last_name),
        first = render::escape_html(&detail.first_name),
        status = render::escape_html(&detail.status),
        pid = detail.patient_id,
        mrn = render::escape_html(&detail.mrn),
        age = age_display(&detail.dob, today),
        dob = render::escape_html(&detail.dob),
        clinic = render::escape_html(clinic_name),
        enrolled = render::escape_html(&detail.enrollment_date),
        providers = providers_table(detail),
        phq9_first = measure_display(detail.phq9_first, Instrument::Phq9),
        phq9_last = measure_display(detail.phq9_last, Instrument::Phq9),
        gad7_first = measure_display(detail.gad7_first, Instrument::Gad7),
        gad7_last = measure_display(detail.gad7_last, Instrument::Gad7),
    )
}
