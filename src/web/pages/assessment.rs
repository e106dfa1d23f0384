//! Initial-assessment form: PHQ-9 and GAD-7 screening with session
//! details, posted to the backend as a single submission.

use axum::{
    extract::Path,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;

use crate::forms::{AssessmentForm, FormErrors};
use crate::models::{PatientDetail, SessionType, StaffOption};
use crate::scores::{Instrument, ANSWER_OPTIONS};
use crate::session::Session;
use crate::shell::PathKind;
use crate::web::pages::{gate, Gate};
use crate::web::render;
use crate::web::types::PortalContext;

/// Patient context plus the clinic the submission will be filed under.
struct Target {
    detail: PatientDetail,
    clinic_id: i64,
}

/// Fetch the patient and check assessment preconditions. `Err` carries
/// the full response to return: the degraded body or the redirect back
/// to the detail page.
async fn load_target(ctx: &PortalContext, id: i64, shell: &PageShell) -> Result<Target, Response> {
    let detail = match ctx.backend.fetch_patient(id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(error = %e, patient_id = id, "Patient fetch failed");
            return Err(shell.error_page("Failed to fetch patient data"));
        }
    };

    if !detail.assessment_eligible() {
        return Err(Redirect::temporary(&format!("/patients/{id}")).into_response());
    }

    let clinic_id = match detail.clinic_id {
        Some(clinic_id) => clinic_id,
        None => {
            return Err(shell.error_page(
                "No clinic selected. Please select a clinic before accessing this form.",
            ))
        }
    };

    Ok(Target { detail, clinic_id })
}

async fn load_consultants(
    ctx: &PortalContext,
    clinic_id: i64,
    shell: &PageShell,
) -> Result<Vec<StaffOption>, Response> {
    match ctx.backend.fetch_consultants(clinic_id).await {
        Ok(consultants) => Ok(consultants),
        Err(e) => {
            tracing::warn!(error = %e, clinic_id, "Consultant fetch failed");
            Err(shell.error_page(&format!(
                "Failed to fetch consultant data: {}",
                e.user_message()
            )))
        }
    }
}

/// Header context shared by every response this page can produce.
struct PageShell {
    header: String,
}

impl PageShell {
    fn error_page(&self, message: &str) -> Response {
        Html(render::page(
            "Initial Assessment",
            self.header.clone(),
            render::error_region(message),
        ))
        .into_response()
    }

    fn form_page(&self, body: String) -> Html<String> {
        Html(render::page("Initial Assessment", self.header.clone(), body))
    }
}

pub async fn show(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Assessment).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };
    let shell = PageShell {
        header: render::standard_header(&profile, clinic.as_ref()),
    };

    let target = match load_target(&ctx, id, &shell).await {
        Ok(target) => target,
        Err(response) => return response,
    };
    let consultants = match load_consultants(&ctx, target.clinic_id, &shell).await {
        Ok(consultants) => consultants,
        Err(response) => return response,
    };

    let form = AssessmentForm {
        contact_date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        ..AssessmentForm::default()
    };

    let body = render_form(
        &target.detail,
        &form,
        &consultants,
        &FormErrors::default(),
        None,
    );
    shell.form_page(body).into_response()
}

pub async fn submit(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Assessment).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };
    let shell = PageShell {
        header: render::standard_header(&profile, clinic.as_ref()),
    };

    let target = match load_target(&ctx, id, &shell).await {
        Ok(target) => target,
        Err(response) => return response,
    };
    let consultants = match load_consultants(&ctx, target.clinic_id, &shell).await {
        Ok(consultants) => consultants,
        Err(response) => return response,
    };

    let form = AssessmentForm::from_pairs(&pairs);
    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(errors) => {
            let body = render_form(&target.detail, &form, &consultants, &errors, None);
            return (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                shell.form_page(body),
            )
                .into_response();
        }
    };

    let submission =
        validated.into_submission(target.detail.patient_id, target.clinic_id, session.user_id());
    match ctx.backend.submit_assessment(&submission).await {
        Ok(()) => Redirect::to(&format!("/patients/{id}")).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, patient_id = id, "Assessment submission failed");
            let body = render_form(
                &target.detail,
                &form,
                &consultants,
                &FormErrors::default(),
                Some("Failed to submit the assessment. Please try again."),
            );
            shell.form_page(body).into_response()
        }
    }
}

fn question_rows(instrument: Instrument, slots: &[Option<u8>]) -> String {
    let prefix = instrument.field_prefix();
    instrument
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let number = i + 1;
            let options: String = ANSWER_OPTIONS
                .iter()
                .map(|(value, label)| {
                    let checked = if slots.get(i).copied().flatten() == Some(*value) {
                        " checked"
                    } else {
                        ""
                    };
                    format!(
                        r#"<label><input type="radio" name="{prefix}_{number}" value="{value}" data-instrument="{prefix}"{checked}> {label}</label>"#
                    )
                })
                .collect();
            format!(
                r#"<div class="question"><p>{number}. {question}</p><div class="options">{options}</div></div>"#,
                question = render::escape_html(question),
            )
        })
        .collect()
}

fn current_total(slots: &[Option<u8>]) -> u32 {
    slots.iter().flatten().map(|&v| u32::from(v)).sum()
}

fn consultant_select(consultants: &[StaffOption], selected: &str) -> String {
    if consultants.is_empty() {
        return "<p>No consultants available</p>".to_string();
    }
    let mut options = String::from(r#"<option value="">Select a consultant</option>"#);
    for consultant in consultants {
        let marker = if selected == consultant.id.to_string() {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{id}"{marker}>{name}</option>"#,
            id = consultant.id,
            name = render::escape_html(&consultant.name),
        ));
    }
    format!(r#"<select name="psychiatric_consultant_id">{options}</select>"#)
}

fn session_type_select(selected: &str) -> String {
    let mut options = String::from(r#"<option value="">Select session type</option>"#);
    for session_type in SessionType::all() {
        let marker = if selected == session_type.as_str() {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            r#"<option value="{value}"{marker}>{label}</option>"#,
            value = session_type.as_str(),
            label = session_type.label(),
        ));
    }
    format!(r#"<select name="session_type">{options}</select>"#)
}

const RUNNING_TOTAL_SCRIPT: &str = r#"<script>
function updateTotals() {
  ["phq9", "gad7"].forEach(function (prefix) {
    var total = 0;
    document.querySelectorAll('input[data-instrument="' + prefix + '"]:checked')
      .forEach(function (el) { total += parseInt(el.value, 10); });
    document.getElementById(prefix + "-total").textContent = total;
  });
}
document.querySelectorAll("input[data-instrument]").forEach(function (el) {
  el.addEventListener("change", updateTotals);
});
</script>"#;

fn render_form(
    detail: &PatientDetail,
    form: &AssessmentForm,
    consultants: &[StaffOption],
    errors: &FormErrors,
    submit_error: Option<&str>,
) -> String {
    let banner = match submit_error {
        Some(message) => render::banner(message),
        None => String::new(),
    };
    let discuss_checked = if form.discuss_with_consultant {
        " checked"
    } else {
        ""
    };

    format!(
        r#"<h1>Initial Assessment</h1>
<p>{last}, {first} &middot; MRN: {mrn}</p>
{banner}
<form class="panel" method="post" action="/patients/{pid}/assessment">
<label for="contact_date">Contact Date</label>
<input type="date" id="contact_date" name="contact_date" value="{contact_date}">
{contact_date_error}
<h2>PHQ-9 Depression Screening <span>Total: <span id="phq9-total">{phq9_total}</span>/27</span></h2>
{phq9_error}
{phq9_rows}
<h2>GAD-7 Anxiety Screening <span>Total: <span id="gad7-total">{gad7_total}</span>/21</span></h2>
{gad7_error}
{gad7_rows}
<h2>Consultant Discussion</h2>
<label><input type="checkbox" name="discuss_with_consultant"{discuss_checked}> Discuss with psychiatric consultant</label>
<label for="psychiatric_consultant_id">Psychiatric Consultant</label>
{consultant_select}
<label for="consultant_notes">Notes for Consultant</label>
<textarea id="consultant_notes" name="consultant_notes" rows="3">{notes}</textarea>
<h2>Session</h2>
<label for="session_type">Session Type</label>
{session_type_select}
{session_type_error}
<label for="session_duration">Session Duration (minutes)</label>
<input type="number" id="session_duration" name="session_duration" min="1" value="{duration}">
{session_duration_error}
<p>
<button class="btn btn-primary" type="submit">Submit Assessment</button>
<a class="btn btn-secondary" href="/patients/{pid}">Cancel</a>
</p>
</form>
{script}"#,
        last = render::escape_html(&detail.last_name),
        first = render::escape_html(&detail.first_name),
        mrn = render::escape_html(&detail.mrn),
        pid = detail.patient_id,
        contact_date = render::escape_html(&form.contact_date),
        contact_date_error = render::field_error(errors, "contact_date"),
        phq9_total = current_total(&form.phq9),
        phq9_error = render::field_error(errors, "phq9"),
        phq9_rows = question_rows(Instrument::Phq9, &form.phq9),
        gad7_total = current_total(&form.gad7),
        gad7_error = render::field_error(errors, "gad7"),
        gad7_rows = question_rows(Instrument::Gad7, &form.gad7),
        consultant_select = consultant_select(consultants, &form.psychiatric_consultant_id),
        notes = render::escape_html(&form.consultant_notes),
        session_type_select = session_type_select(&form.session_type),
        session_type_error = render::field_error(errors, "session_type"),
        duration = render::escape_html(&form.session_duration),
        session_duration_error = render::field_error(errors, "session_duration"),
        script = RUNNING_TOTAL_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> PatientDetail {
        PatientDetail {
            patient_id: 9,
            clinic_id: Some(3),
            mrn: "MRN009".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Reyes".to_string(),
            dob: "06/15/1975".to_string(),
            enrollment_date: "02/01/2024".to_string(),
            clinic_name: Some("Northside".to_string()),
            status: "E".to_string(),
            phq9_first: None,
            phq9_last: None,
            gad7_first: None,
            gad7_last: None,
            providers: Vec::new(),
        }
    }

    fn consultants() -> Vec<StaffOption> {
        vec![
            StaffOption {
                id: 5,
                name: "Sam Okafor".to_string(),
            },
            StaffOption {
                id: 6,
                name: "Dana Liu".to_string(),
            },
        ]
    }

    #[test]
    fn form_renders_every_question_with_options() {
        let html = render_form(
            &detail(),
            &AssessmentForm::default(),
            &consultants(),
            &FormErrors::default(),
            None,
        );
        assert!(html.contains("Little interest or pleasure in doing things"));
        assert!(html.contains("Thoughts that you would be better off dead, or of hurting yourself"));
        assert!(html.contains("Feeling afraid, as if something awful might happen"));
        assert!(html.contains(r#"name="phq9_9""#));
        assert!(html.contains(r#"name="gad7_7""#));
        assert!(!html.contains(r#"name="gad7_8""#));
        assert!(html.contains("Not at all"));
        assert!(html.contains("Nearly every day"));
    }

    #[test]
    fn selected_answers_stay_checked_on_rerender() {
        let mut form = AssessmentForm::default();
        form.phq9[0] = Some(2);
        let html = render_form(
            &detail(),
            &form,
            &consultants(),
            &FormErrors::default(),
            None,
        );
        assert!(html.contains(r#"name="phq9_1" value="2" data-instrument="phq9" checked"#));
        assert!(!html.contains(r#"name="phq9_1" value="3" data-instrument="phq9" checked"#));
    }

    #[test]
    fn running_totals_reflect_current_selections() {
        let mut form = AssessmentForm::default();
        form.phq9[0] = Some(3);
        form.phq9[4] = Some(2);
        form.gad7[1] = Some(1);
        let html = render_form(
            &detail(),
            &form,
            &consultants(),
            &FormErrors::default(),
            None,
        );
        assert!(html.contains(r#"<span id="phq9-total">5</span>/27"#));
        assert!(html.contains(r#"<span id="gad7-total">1</span>/21"#));
        assert!(html.contains("updateTotals"));
    }

    #[test]
    fn consultant_options_and_empty_state() {
        let html = consultant_select(&consultants(), "6");
        assert!(html.contains(r#"<option value="6" selected>Dana Liu</option>"#));
        assert!(html.contains(r#"<option value="5">Sam Okafor</option>"#));
        assert_eq!(
            consultant_select(&[], ""),
            "<p>No consultants available</p>"
        );
    }

    #[test]
    fn session_types_render_with_labels() {
        let html = session_type_select("by_video");
        assert!(html.contains(r#"<option value="by_video" selected>By Video</option>"#));
        assert!(html.contains(r#"<option value="in_clinic">In Clinic</option>"#));
        assert!(html.contains("In Group"));
    }

    #[test]
    fn validation_errors_render_inline() {
        let mut errors = FormErrors::default();
        errors.push("phq9", "All PHQ-9 questions must be answered");
        errors.push("session_duration", "Session Duration must be a positive number");
        let html = render_form(
            &detail(),
            &AssessmentForm::default(),
            &consultants(),
            &errors,
            None,
        );
        assert!(html.contains("All PHQ-9 questions must be answered"));
        assert!(html.contains("Session Duration must be a positive number"));
    }

    #[test]
    fn submit_failure_banner_has_no_error_prefix() {
        let html = render_form(
            &detail(),
            &AssessmentForm::default(),
            &consultants(),
            &FormErrors::default(),
            Some("Failed to submit the assessment. Please try again."),
        );
        assert!(html.contains("Failed to submit the assessment. Please try again."));
        assert!(!html.contains("Error: Failed to submit the assessment."));
    }
}
