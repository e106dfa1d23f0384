//! Shared HTML rendering: the page shell, the header variants, and the
//! small building blocks every page uses.
//!
//! Pages are self-contained documents with inline styles; there are no
//! static assets to serve. Anything that interpolates fetched or
//! user-entered text goes through [`escape_html`].

use crate::models::{ClinicSummary, UserProfile};

/// Escape text destined for HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Minimal query-string encoding for values embedded in page links.
pub fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push('+'),
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}

/// Assemble a complete document from a header strip and page body.
pub fn page(title: &str, header: String, body: String) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Careloop</title>
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f8fafc;color:#0f172a}}
header{{background:#0f766e;color:#fff;padding:12px 24px;display:flex;align-items:center;gap:24px;flex-wrap:wrap}}
header .brand{{font-size:1.25rem;font-weight:700}}
header nav a{{color:#ccfbf1;text-decoration:none;margin-right:16px;font-size:.95rem}}
header nav a:hover{{color:#fff}}
header .who{{margin-left:auto;font-size:.85rem;color:#99f6e4}}
header form{{display:inline-flex;gap:8px;align-items:center;margin:0}}
header select{{padding:4px;border-radius:4px;border:none;font-size:.85rem}}
main{{max-width:1080px;margin:24px auto;padding:0 24px}}
h1{{font-size:1.4rem;margin:0 0 16px}}
h2{{font-size:1.1rem;margin:24px 0 8px}}
table{{width:100%;border-collapse:collapse;background:#fff;border-radius:8px;overflow:hidden}}
th,td{{text-align:left;padding:10px 12px;border-bottom:1px solid #e2e8f0;font-size:.9rem}}
th a{{color:#0f172a;text-decoration:none}}
.cards{{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:16px}}
.card{{background:#fff;border-radius:8px;padding:16px;box-shadow:0 1px 3px rgba(0,0,0,.08)}}
.card .metric{{font-size:1.8rem;font-weight:700;margin:4px 0}}
.card .delta{{font-size:.8rem;color:#64748b}}
.error{{background:#fef2f2;border:1px solid #fecaca;color:#b91c1c;border-radius:8px;padding:12px 16px;margin:16px 0}}
.notice{{background:#f0fdf4;border:1px solid #bbf7d0;color:#166534;border-radius:8px;padding:12px 16px;margin:16px 0}}
.field-error{{color:#b91c1c;font-size:.8rem;margin:4px 0 0}}
form.panel{{background:#fff;border-radius:8px;padding:24px;box-shadow:0 1px 3px rgba(0,0,0,.08)}}
label{{display:block;font-size:.85rem;font-weight:600;margin:12px 0 4px}}
input,select,textarea{{width:100%;padding:8px;border:1px solid #cbd5e1;border-radius:6px;font-size:.9rem}}
.btn{{display:inline-block;padding:10px 18px;border:none;border-radius:6px;font-size:.95rem;font-weight:600;cursor:pointer;text-decoration:none}}
.btn-primary{{background:#0f766e;color:#fff}}
.btn-secondary{{background:#e2e8f0;color:#0f172a}}
.question{{border-bottom:1px solid #e2e8f0;padding:12px 0}}
.question .options{{display:flex;gap:16px;flex-wrap:wrap;margin-top:6px}}
.question .options label{{display:inline-flex;gap:6px;font-weight:400;margin:0;align-items:center}}
.question .options input{{width:auto}}
.pager a,.pager span.current{{margin-right:8px;font-size:.85rem}}
.pager span.current{{font-weight:700}}
.actions a{{margin-right:8px;font-size:.85rem;color:#0f766e}}
.table-footer{{display:flex;justify-content:space-between;align-items:center;padding:12px 0;font-size:.85rem;color:#475569;flex-wrap:wrap;gap:8px}}
.columns{{display:grid;grid-template-columns:2fr 1fr;gap:16px;align-items:start}}
</style>
</head>
<body>
<header>{header}</header>
<main>{body}</main>
</body>
</html>"##
    )
}

/// Header for the public landing page.
pub fn public_header() -> String {
    r#"<span class="brand">Careloop</span>"#.to_string()
}

/// Header for standard clinical users: nav, clinic switcher, user name.
pub fn standard_header(profile: &UserProfile, clinic: Option<&ClinicSummary>) -> String {
    let clinic_strip = match clinic {
        Some(active) => {
            let mut options = String::new();
            for c in &profile.clinics {
                let selected = if c.id == active.id { " selected" } else { "" };
                options.push_str(&format!(
                    r#"<option value="{id}"{selected}>{name}</option>"#,
                    id = c.id,
                    name = escape_html(&c.name),
                ));
            }
            format!(
                r#"<form method="post" action="/clinic"><span>Current Clinic: {name}</span><select name="clinic_id">{options}</select><button class="btn btn-secondary" type="submit">Switch</button></form>"#,
                name = escape_html(&active.name),
            )
        }
        None => String::new(),
    };

    format!(
        r#"<span class="brand">Careloop</span>
<nav><a href="/dashboard">Dashboard</a><a href="/active-patients">Active Patients</a><a href="/enroll">Enroll Patient</a></nav>
{clinic_strip}
<span class="who">{user}</span>"#,
        user = escape_html(&profile.name),
    )
}

/// Header for the admin area: tab links and user name.
pub fn admin_header(profile: &UserProfile) -> String {
    format!(
        r#"<span class="brand">Careloop</span>
<nav><a href="/admin?tab=clinics">Clinics</a><a href="/admin?tab=users">Users</a><a href="/admin?tab=settings">Settings</a></nav>
<span class="who">{user}</span>"#,
        user = escape_html(&profile.name),
    )
}

/// Inline fetch-error region, prefixed the way every view reports a
/// failed data fetch.
pub fn error_region(message: &str) -> String {
    format!(r#"<div class="error">Error: {}</div>"#, escape_html(message))
}

/// Form-level banner without the fetch-error prefix.
pub fn banner(message: &str) -> String {
    format!(r#"<div class="error">{}</div>"#, escape_html(message))
}

pub fn notice_region(message: &str) -> String {
    format!(r#"<div class="notice">{}</div>"#, escape_html(message))
}

/// Per-field validation message, or nothing when the field is clean.
pub fn field_error(errors: &crate::forms::FormErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(
            r#"<p class="field-error">{}</p>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

/// Page rendered when the profile fetch fails: requested page shell,
/// no user context, inline fetch error.
pub fn degraded_page(title: &str) -> String {
    page(
        title,
        public_header(),
        error_region("Error fetching user data"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn profile() -> UserProfile {
        UserProfile {
            id: 42,
            email: "cm@example.org".to_string(),
            name: "Casey <Morgan>".to_string(),
            role: Role::StandardUser,
            clinics: vec![
                ClinicSummary {
                    id: 1,
                    name: "Northside".to_string(),
                },
                ClinicSummary {
                    id: 2,
                    name: "Downtown & Main".to_string(),
                },
            ],
        }
    }

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn encodes_query_values() {
        assert_eq!(encode_query("MRN007"), "MRN007");
        assert_eq!(encode_query("a b&c=d"), "a+b%26c%3Dd");
        assert_eq!(encode_query("50% +2"), "50%25+%2B2");
    }

    #[test]
    fn page_carries_title_and_body() {
        let html = page("Dashboard", public_header(), "<h1>Body</h1>".to_string());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Dashboard | Careloop</title>"));
        assert!(html.contains("<h1>Body</h1>"));
    }

    #[test]
    fn standard_header_marks_active_clinic() {
        let p = profile();
        let html = standard_header(&p, Some(&p.clinics[1]));
        assert!(html.contains("Current Clinic: Downtown &amp; Main"));
        assert!(html.contains(r#"<option value="2" selected>"#));
        assert!(html.contains(r#"<option value="1">"#));
        assert!(html.contains("Casey &lt;Morgan&gt;"));
    }

    #[test]
    fn standard_header_without_clinic_has_no_switcher() {
        let p = profile();
        let html = standard_header(&p, None);
        assert!(!html.contains("Current Clinic"));
        assert!(html.contains("/active-patients"));
    }

    #[test]
    fn error_region_prefixes_message() {
        let html = error_region("Error fetching patients");
        assert!(html.contains("Error: Error fetching patients"));
    }

    #[test]
    fn field_error_is_empty_for_clean_fields() {
        let mut errors = crate::forms::FormErrors::default();
        errors.push("mrn", "MRN is required");
        assert!(field_error(&errors, "mrn").contains("MRN is required"));
        assert_eq!(field_error(&errors, "dob"), "");
    }

    #[test]
    fn degraded_page_reports_profile_fetch_failure() {
        let html = degraded_page("Dashboard");
        assert!(html.contains("Error: Error fetching user data"));
        assert!(!html.contains("Current Clinic"));
    }
}
