//! Active-patient roster engine: filter, sort, paginate.
//!
//! Pure functions over roster rows fetched from the backend. The web layer
//! parses query parameters into a [`RosterQuery`], applies it here, and
//! renders the resulting [`RosterPage`]. Nothing in this module performs IO.

use std::cmp::Ordering;

use crate::models::{RosterPatient, RosterSortKey, SortDirection};

/// Page sizes offered by the roster footer.
pub const PAGE_SIZES: [usize; 4] = [50, 100, 150, 200];

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSize {
    Limited(usize),
    All,
}

impl PageSize {
    /// Parse the `size` query parameter. Anything other than `all` or one
    /// of the offered sizes falls back to the default.
    pub fn parse(raw: Option<&str>) -> PageSize {
        match raw {
            Some("all") => PageSize::All,
            Some(n) => n
                .parse::<usize>()
                .ok()
                .filter(|n| PAGE_SIZES.contains(n))
                .map(PageSize::Limited)
                .unwrap_or(PageSize::Limited(DEFAULT_PAGE_SIZE)),
            None => PageSize::Limited(DEFAULT_PAGE_SIZE),
        }
    }

    /// Value used in page-size links.
    pub fn as_query(&self) -> String {
        match self {
            PageSize::Limited(n) => n.to_string(),
            PageSize::All => "all".to_string(),
        }
    }
}

/// Decoded roster query. Unparseable parameters fall back to defaults
/// rather than rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    pub q: String,
    pub sort: RosterSortKey,
    pub dir: SortDirection,
    pub page: usize,
    pub size: PageSize,
}

impl Default for RosterQuery {
    fn default() -> Self {
        RosterQuery {
            q: String::new(),
            sort: RosterSortKey::LastName,
            dir: SortDirection::Asc,
            page: 0,
            size: PageSize::Limited(DEFAULT_PAGE_SIZE),
        }
    }
}

impl RosterQuery {
    pub fn from_params(
        q: Option<&str>,
        sort: Option<&str>,
        dir: Option<&str>,
        page: Option<&str>,
        size: Option<&str>,
    ) -> RosterQuery {
        RosterQuery {
            q: q.unwrap_or_default().to_string(),
            sort: sort
                .and_then(|s| s.parse().ok())
                .unwrap_or(RosterSortKey::LastName),
            dir: dir.and_then(|s| s.parse().ok()).unwrap_or(SortDirection::Asc),
            page: page.and_then(|s| s.parse().ok()).unwrap_or(0),
            size: PageSize::parse(size),
        }
    }

    /// Direction a header link for `key` should request: toggle when the
    /// column is already active, ascending otherwise.
    pub fn link_direction(&self, key: &RosterSortKey) -> SortDirection {
        if &self.sort == key {
            self.dir.toggled()
        } else {
            SortDirection::Asc
        }
    }
}

/// One rendered page of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPage {
    pub rows: Vec<RosterPatient>,
    pub total_filtered: usize,
    pub page: usize,
    pub page_count: usize,
    pub showing_from: usize,
    pub showing_to: usize,
}

impl RosterPage {
    pub fn footer(&self) -> String {
        format!(
            "Showing {} - {} of {} records",
            self.showing_from, self.showing_to, self.total_filtered
        )
    }
}

/// Case-insensitive substring match against first name, last name, or MRN.
/// An empty query matches everything.
pub fn matches_search(patient: &RosterPatient, q: &str) -> bool {
    if q.is_empty() {
        return true;
    }
    let needle = q.to_lowercase();
    patient.first_name.to_lowercase().contains(&needle)
        || patient.last_name.to_lowercase().contains(&needle)
        || patient.mrn.to_lowercase().contains(&needle)
}

fn sort_field<'a>(patient: &'a RosterPatient, key: &RosterSortKey) -> &'a str {
    match key {
        RosterSortKey::Mrn => &patient.mrn,
        RosterSortKey::FirstName => &patient.first_name,
        RosterSortKey::LastName => &patient.last_name,
        RosterSortKey::Dob => &patient.dob,
        RosterSortKey::EnrollmentDate => &patient.enrollment_date,
        RosterSortKey::CareManager => &patient.care_manager,
    }
}

/// Total order over roster rows: string comparison on the selected column,
/// then mrn, then id. The tie-break makes the order deterministic, so
/// flipping the direction yields the exact reverse sequence.
pub fn compare(
    a: &RosterPatient,
    b: &RosterPatient,
    key: &RosterSortKey,
    dir: &SortDirection,
) -> Ordering {
    let ordering = sort_field(a, key)
        .cmp(sort_field(b, key))
        .then_with(|| a.mrn.cmp(&b.mrn))
        .then_with(|| a.id.cmp(&b.id));
    match dir {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Run the full pipeline over a fetched roster.
pub fn apply(rows: &[RosterPatient], query: &RosterQuery) -> RosterPage {
    let mut filtered: Vec<RosterPatient> = rows
        .iter()
        .filter(|p| matches_search(p, &query.q))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| compare(a, b, &query.sort, &query.dir));

    let total_filtered = filtered.len();
    match query.size {
        PageSize::All => RosterPage {
            showing_from: 1,
            showing_to: total_filtered,
            total_filtered,
            page: 0,
            page_count: 1,
            rows: filtered,
        },
        PageSize::Limited(size) => {
            let start = query.page * size;
            let rows: Vec<RosterPatient> =
                filtered.into_iter().skip(start).take(size).collect();
            RosterPage {
                showing_from: start + 1,
                showing_to: (start + size).min(total_filtered),
                total_filtered,
                page: query.page,
                page_count: total_filtered.div_ceil(size),
                rows,
            }
        }
    }
}
