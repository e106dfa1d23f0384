//! Active-patient roster: the filtered, sorted, paginated table.

use std::collections::HashMap;

use axum::{
    extract::Query,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::models::{RosterSortKey, SortDirection};
use crate::roster::{apply, PageSize, RosterPage, RosterQuery, PAGE_SIZES};
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
    let (profile, clinic) = match gate(&ctx, &session, PathKind::Roster).await {
        Gate::Allow { profile, clinic } => (profile, clinic),
        Gate::Denied(response) => return response,
    };

    let query = RosterQuery::from_params(
        params.get("q").map(String::as_str),
        params.get("sort").map(String::as_str),
        params.get("dir").map(String::as_str),
        params.get("page").map(String::as_str),
        params.get("size").map(String::as_str),
    );

    let body = match &clinic {
        Some(active) => match ctx.backend.fetch_active_patients(active.id).await {
            Ok(patients) => render_roster(&apply(&patients, &query), &query),
            Err(e) => {
                tracing::warn!(error = %e, clinic_id = active.id, "Roster fetch failed");
                render::error_region("Error fetching patients")
            }
        },
        None => render::notice_region("No clinic is assigned to this account."),
    };

    let header = render::standard_header(&profile, clinic.as_ref());
    Html(render::page("Active Patients", header, body)).into_response()
}

/// Build an `/active-patients` link preserving the other parameters.
fn roster_link(q: &str, sort: &RosterSortKey, dir: &SortDirection, page: usize, size: &PageSize) -> String {
    format!(
        "/active-patients?q={q}&sort={sort}&dir={dir}&page={page}&size={size}",
        q = render::encode_query(q),
        sort = sort.as_str(),
        dir = dir.as_str(),
        size = size.as_query(),
    )
}

fn header_cell(query: &RosterQuery, key: RosterSortKey) -> String {
    let indicator = if query.sort == key {
        match query.dir {
            SortDirection::Asc => " &uarr;",
            SortDirection::Desc => " &darr;",
        }
    } else {
        ""
    };
    // Header links reset to the first page; whatever was showing on
    // page N of the old ordering is meaningless under the new one.
    let href = roster_link(&query.q, &key, &query.link_direction(&key), 0, &query.size);
    format!(
        r#"<th><a href="{href}">{label}{indicator}</a></th>"#,
        label = key.label(),
    )
}

fn render_roster(page: &RosterPage, query: &RosterQuery) -> String {
    let mut headers = String::new();
    for key in RosterSortKey::all() {
        headers.push_str(&header_cell(query, key));
    }
    headers.push_str("<th>Actions</th>");

    let rows: String = if page.rows.is_empty() {
        r#"<tr><td colspan="7">No patients found</td></tr>"#.to_string()
    } else {
        page.rows
            .iter()
            .map(|p| {
                format!(
                    r##"<tr><td>{mrn}</td><td>{first}</td><td>{last}</td><td>{dob}</td><td>{enrolled}</td><td>{cm}</td><td class="actions"><a href="/patients/{id}">View</a><a href="#">Edit</a><a href="#">Delete</a></td></tr>"##,
                    mrn = render::escape_html(&p.mrn),
                    first = render::escape_html(&p.first_name),
                    last = render::escape_html(&p.last_name),
                    dob = render::escape_html(&p.dob),
                    enrolled = render::escape_html(&p.enrollment_date),
                    cm = render::escape_html(&p.care_manager),
                    id = p.id,
                )
            })
            .collect()
    };

    let mut pager = String::new();
    for n in 0..page.page_count {
        if n == page.page {
            pager.push_str(&format!(r#"<span class="current">{}</span>"#, n + 1));
        } else {
            let href = roster_link(&query.q, &query.sort, &query.dir, n, &query.size);
            pager.push_str(&format!(r#"<a href="{href}">{}</a>"#, n + 1));
        }
    }

    let mut sizes = String::new();
    for n in PAGE_SIZES {
        let href = roster_link(&query.q, &query.sort, &query.dir, 0, &PageSize::Limited(n));
        sizes.push_str(&format!(r#"<a href="{href}">{n}</a> "#));
    }
    let all_href = roster_link(&query.q, &query.sort, &query.dir, 0, &PageSize::All);
    sizes.push_str(&format!(r#"<a href="{all_href}">All</a>"#));

    format!(
        r#"<h1>Active Patients</h1>
<form method="get" action="/active-patients">
<input type="search" name="q" value="{q}" placeholder="Search by name or MRN">
<input type="hidden" name="sort" value="{sort}">
<input type="hidden" name="dir" value="{dir}">
<button class="btn btn-primary" type="submit">Search</button>
</form>
<table>
<thead><tr>{headers}</tr></thead>
<tbody>{rows}</tbody>
</table>
<div class="table-footer">
<span>{footer}</span>
<span class="pager">{pager}</span>
<span>Per page: {sizes}</span>
</div>"#,
        q = render::escape_html(&query.q),
        sort = query.sort.as_str(),
        dir = query.dir.as_str(),
        footer = page.footer(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterPatient;

    fn patients(n: usize) -> Vec<RosterPatient> {
        (0..n)
            .map(|i| RosterPatient {
                id: i as i64 + 1,
                mrn: format!("MRN{:03}", i + 1),
                first_name: format!("First{i}"),
                last_name: format!("Last{i}"),
                dob: "01/02/1980".to_string(),
                enrollment_date: "03/04/2024".to_string(),
                care_manager: "Avery Quinn".to_string(),
            })
            .collect()
    }

    #[test]
    fn table_links_every_sortable_column() {
        let query = RosterQuery::default();
        let html = render_roster(&apply(&patients(3), &query), &query);
        for key in RosterSortKey::all() {
            assert!(html.contains(key.label()), "missing column {}", key.label());
            assert!(html.contains(&format!("sort={}", key.as_str())));
        }
        assert!(html.contains("View"));
        assert!(html.contains("Edit"));
        assert!(html.contains("Delete"));
    }

    #[test]
    fn active_sort_column_shows_direction_and_toggles() {
        let query = RosterQuery::default();
        let html = render_roster(&apply(&patients(3), &query), &query);
        // Default sort is lastName ascending; its header link flips to desc.
        assert!(html.contains("Last Name &uarr;"));
        assert!(html.contains("sort=lastName&dir=desc&page=0"));
        // Other columns link ascending with no indicator.
        assert!(html.contains("sort=mrn&dir=asc&page=0"));
        assert!(!html.contains("MRN &uarr;"));
    }

    #[test]
    fn pager_marks_current_page_and_links_the_rest() {
        let query = RosterQuery {
            page: 1,
            ..RosterQuery::default()
        };
        let html = render_roster(&apply(&patients(120), &query), &query);
        assert!(html.contains("Showing 51 - 100 of 120 records"));
        assert!(html.contains(r#"<span class="current">2</span>"#));
        assert!(html.contains("page=0&size=50"));
        assert!(html.contains("page=2&size=50"));
    }

    #[test]
    fn size_links_reset_to_first_page() {
        let query = RosterQuery {
            page: 2,
            ..RosterQuery::default()
        };
        let html = render_roster(&apply(&patients(120), &query), &query);
        assert!(html.contains("page=0&size=100"));
        assert!(html.contains("page=0&size=all"));
    }

    #[test]
    fn search_term_survives_in_links_and_input() {
        let query = RosterQuery {
            q: "ann lee".to_string(),
            ..RosterQuery::default()
        };
        let html = render_roster(&apply(&patients(3), &query), &query);
        assert!(html.contains(r#"value="ann lee""#));
        assert!(html.contains("q=ann+lee"));
    }

    #[test]
    fn empty_result_renders_placeholder_row() {
        let query = RosterQuery {
            q: "zzz".to_string(),
            ..RosterQuery::default()
        };
        let html = render_roster(&apply(&patients(3), &query), &query);
        assert!(html.contains("No patients found"));
        assert!(html.contains("Showing 1 - 0 of 0 records"));
    }
}
