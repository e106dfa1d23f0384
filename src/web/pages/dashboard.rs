//! Standard-user home: clinic metric cards and quick actions.

use std::collections::HashMap;

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::models::ClinicMetrics;
use crate::session::Session;
use crate::shell::PathKind;
use crate::web::pages::{gate, Gate};
use crate::web::render;
use crate::web::types::PortalContext;

pub async fn show(
    Extension(ctx): Extension<PortalContext>,
    Extension(session): Extension<Session>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Dashboard).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };

    let enrolled = params.get("enrolled").map(String::as_str) == Some("1");

    let body = match &clinic {
        Some(active) => match ctx.backend.fetch_clinic_metrics(active.id).await {
            Ok(metrics) => render_dashboard(&metrics, enrolled),
            Err(e) => {
                tracing::warn!(error = %e, clinic_id = active.id, "Clinic metrics fetch failed");
                render::error_region("Error fetching clinic data")
            }
        },
        None => render::notice_region("No clinic is assigned to this account."),
    };

    let header = render::standard_header(&profile, clinic.as_ref());
    Html(render::page("Dashboard", header, body)).into_response()
}

fn metric_card(title: &str, value: String, delta: &str) -> String {
    format!(
        r#"<div class="card"><div>{title}</div><div class="metric">{value}</div><div class="delta">{delta}</div></div>"#
    )
}

fn render_dashboard(metrics: &ClinicMetrics, enrolled: bool) -> String {
    let notice = if enrolled {
        render::notice_region("Patient enrolled successfully!")
    } else {
        String::new()
    };

    let cards = [
        metric_card(
            "Total Patients",
            metrics.total_patients.to_string(),
            "+5.2% from last month",
        ),
        metric_card(
            "Active Patients",
            metrics.active_patients.to_string(),
            "+3.1% from last month",
        ),
        metric_card(
            "Total Minutes Tracked",
            metrics.total_minutes_tracked.to_string(),
            "+12.5% from last month",
        ),
        metric_card(
            "Average Minutes per Patient",
            format!("{:.1}", metrics.average_minutes_per_patient),
            "-2.3% from last month",
        ),
    ]
    .join("\n");

    format!(
        r##"<h1>Dashboard</h1>
{notice}
<div class="cards">
{cards}
</div>
<div class="cards" style="margin-top:16px">
<div class="card"><div>Patient Enrollment</div><div class="metric">{new_patients}</div><div class="delta">New patients this month</div><a class="btn btn-primary" href="/enroll">Enroll New Patient</a></div>
<div class="card"><div>Follow-up Appointments</div><div class="metric">{follow_ups}</div><div class="delta">Scheduled this month</div><a class="btn btn-secondary" href="#">Schedule Follow-up</a></div>
</div>"##,
        new_patients = metrics.new_patients,
        follow_ups = metrics.follow_up_appointments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ClinicMetrics {
        ClinicMetrics {
            total_patients: 128,
            active_patients: 97,
            total_minutes_tracked: 5420,
            average_minutes_per_patient: 55.87,
            new_patients: 11,
            follow_up_appointments: 23,
        }
    }

    #[test]
    fn dashboard_renders_all_metric_cards() {
        let html = render_dashboard(&metrics(), false);
        assert!(html.contains("Total Patients"));
        assert!(html.contains("128"));
        assert!(html.contains("Active Patients"));
        assert!(html.contains("97"));
        assert!(html.contains("Total Minutes Tracked"));
        assert!(html.contains("5420"));
        assert!(html.contains("Average Minutes per Patient"));
        assert!(html.contains("55.9"));
        assert!(html.contains("+5.2% from last month"));
        assert!(html.contains("-2.3% from last month"));
    }

    #[test]
    fn dashboard_links_enrollment_and_follow_ups() {
        let html = render_dashboard(&metrics(), false);
        assert!(html.contains(r#"href="/enroll""#));
        assert!(html.contains("Enroll New Patient"));
        assert!(html.contains("Follow-up Appointments"));
        assert!(html.contains("Schedule Follow-up"));
        assert!(!html.contains("Patient enrolled successfully!"));
    }

    #[test]
    fn enrolled_flag_shows_success_notice() {
        let html = render_dashboard(&metrics(), true);
        assert!(html.contains("Patient enrolled successfully!"));
    }
}
