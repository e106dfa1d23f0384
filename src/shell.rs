//! Session-state resolution and role-based navigation forcing.
//!
//! Every guarded page runs the same sequence: the middleware has already
//! verified the token, the handler resolves the profile (possibly
//! degraded), and [`forced_destination`] decides whether the user may stay
//! on the requested path kind. Both enums are closed, so an unhandled
//! role/path combination fails to compile instead of falling through.

use crate::backend::BackendError;
use crate::models::{ClinicSummary, Role, UserProfile};

/// The guarded path families the portal serves. Each handler names its
/// own kind; nothing is derived from URL strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKind {
    Dashboard,
    Roster,
    PatientDetail,
    Assessment,
    Enrollment,
    Admin,
    ClinicSelect,
}

/// Where the session resolution landed for one request. Requests that
/// fail token verification never get this far; the middleware has
/// already redirected them.
#[derive(Debug)]
pub enum SessionState {
    /// The profile fetch failed. The page shell renders with an inline
    /// fetch-error region, no role forcing, and no clinic context.
    Degraded { error: BackendError },
    /// Profile resolved; `clinic` is the user's active clinic, absent
    /// when the profile lists none.
    Authenticated {
        profile: UserProfile,
        clinic: Option<ClinicSummary>,
    },
}

/// Path a role is redirected to when it requests a path kind outside its
/// area. `None` means the request may proceed.
pub fn forced_destination(role: &Role, path: &PathKind) -> Option<&'static str> {
    match role {
        Role::Admin => match path {
            PathKind::Admin => None,
            PathKind::Dashboard
            | PathKind::Roster
            | PathKind::PatientDetail
            | PathKind::Assessment
            | PathKind::Enrollment
            | PathKind::ClinicSelect => Some("/admin"),
        },
        Role::StandardUser => match path {
            PathKind::Admin => Some("/dashboard"),
            PathKind::Dashboard
            | PathKind::Roster
            | PathKind::PatientDetail
            | PathKind::Assessment
            | PathKind::Enrollment
            | PathKind::ClinicSelect => None,
        },
    }
}

/// Home path for a role, used by the signed-in landing redirect.
pub fn role_home(role: &Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::StandardUser => "/dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_forced_to_admin_area_from_everywhere_else() {
        for path in [
            PathKind::Dashboard,
            PathKind::Roster,
            PathKind::PatientDetail,
            PathKind::Assessment,
            PathKind::Enrollment,
            PathKind::ClinicSelect,
        ] {
            assert_eq!(forced_destination(&Role::Admin, &path), Some("/admin"));
        }
        assert_eq!(forced_destination(&Role::Admin, &PathKind::Admin), None);
    }

    #[test]
    fn standard_user_is_forced_off_admin_only() {
        assert_eq!(
            forced_destination(&Role::StandardUser, &PathKind::Admin),
            Some("/dashboard")
        );
        for path in [
            PathKind::Dashboard,
            PathKind::Roster,
            PathKind::PatientDetail,
            PathKind::Assessment,
            PathKind::Enrollment,
            PathKind::ClinicSelect,
        ] {
            assert_eq!(forced_destination(&Role::StandardUser, &path), None);
        }
    }

    #[test]
    fn role_homes() {
        assert_eq!(role_home(&Role::Admin), "/admin");
        assert_eq!(role_home(&Role::StandardUser), "/dashboard");
    }
}
