//! Admin area: tabbed clinic and user management shell.

use std::collections::HashMap;

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::models::{AdminTab, UserProfile};
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
    let (profile, _clinic) = match gate(&ctx, &session, PathKind::Admin).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };

    let tab = AdminTab::from_query(params.get("tab").map(String::as_str));
    let body = render_panel(&tab, &profile);
    let header = render::admin_header(&profile);
    Html(render::page("Admin", header, body)).into_response()
}

fn clinics_panel(profile: &UserProfile) -> String {
    let rows: String = if profile.clinics.is_empty() {
        r#"<tr><td colspan="2">No clinics to display</td></tr>"#.to_string()
    } else {
        profile
            .clinics
            .iter()
            .map(|c| {
                format!(
                    r#"<tr><td>{id}</td><td>{name}</td></tr>"#,
                    id = c.id,
                    name = render::escape_html(&c.name),
                )
            })
            .collect()
    };
    format!(
        r#"<h1>Clinic Management</h1>
<table><thead><tr><th>ID</th><th>Name</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

fn render_panel(tab: &AdminTab, profile: &UserProfile) -> String {
    match tab {
        AdminTab::Clinics => clinics_panel(profile),
        AdminTab::Users => {
            r#"<h1>User Management</h1>
<table><thead><tr><th>Name</th><th>Email</th><th>Role</th></tr></thead><tbody><tr><td colspan="3">No users to display</td></tr></tbody></table>"#
                .to_string()
        }
        AdminTab::Settings => "<h1>Settings Content</h1>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicSummary, Role};

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            email: "admin@example.org".to_string(),
            name: "Pat Admin".to_string(),
            role: Role::Admin,
            clinics: vec![
                ClinicSummary {
                    id: 1,
                    name: "Northside".to_string(),
                },
                ClinicSummary {
                    id: 2,
                    name: "Downtown".to_string(),
                },
            ],
        }
    }

    #[test]
    fn clinics_panel_lists_profile_clinics() {
        let html = render_panel(&AdminTab::Clinics, &profile());
        assert!(html.contains("Clinic Management"));
        assert!(html.contains("Northside"));
        assert!(html.contains("Downtown"));
    }

    #[test]
    fn settings_panel_is_the_placeholder() {
        let html = render_panel(&AdminTab::Settings, &profile());
        assert!(html.contains("Settings Content"));
    }

    #[test]
    fn users_panel_renders_empty_table() {
        let html = render_panel(&AdminTab::Users, &profile());
        assert!(html.contains("User Management"));
        assert!(html.contains("No users to display"));
    }
}
