use crate::models::error::ModelError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same string mapping so wire values and
/// query-parameter values stay identical.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(SessionType {
    InClinic => "in_clinic",
    ByPhone => "by_phone",
    ByVideo => "by_video",
    InGroup => "in_group",
});

str_enum!(AdminTab {
    Clinics => "clinics",
    Users => "users",
    Settings => "settings",
});

str_enum!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

str_enum!(RosterSortKey {
    Mrn => "mrn",
    FirstName => "firstName",
    LastName => "lastName",
    Dob => "dob",
    EnrollmentDate => "enrollmentDate",
    CareManager => "careManager",
});

impl SessionType {
    /// Human label shown on the contact-session radio group.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::InClinic => "In Clinic",
            SessionType::ByPhone => "By Phone",
            SessionType::ByVideo => "By Video",
            SessionType::InGroup => "In Group",
        }
    }

    pub fn all() -> [SessionType; 4] {
        [
            SessionType::InClinic,
            SessionType::ByPhone,
            SessionType::ByVideo,
            SessionType::InGroup,
        ]
    }
}

impl AdminTab {
    /// Tab selection from the `?tab=` query parameter. A missing parameter
    /// opens the clinics tab; unrecognized values land on settings.
    pub fn from_query(param: Option<&str>) -> Self {
        match param {
            None | Some("clinics") => AdminTab::Clinics,
            Some("users") => AdminTab::Users,
            Some(_) => AdminTab::Settings,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Clinics => "Clinics",
            AdminTab::Users => "Users",
            AdminTab::Settings => "Settings",
        }
    }
}

impl SortDirection {
    /// Direction after clicking a column that is already sorted this way.
    pub fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl RosterSortKey {
    /// Column header text for the roster table.
    pub fn label(&self) -> &'static str {
        match self {
            RosterSortKey::Mrn => "MRN",
            RosterSortKey::FirstName => "First Name",
            RosterSortKey::LastName => "Last Name",
            RosterSortKey::Dob => "Date of Birth",
            RosterSortKey::EnrollmentDate => "Enrollment Date",
            RosterSortKey::CareManager => "Care Manager",
        }
    }

    pub fn all() -> [RosterSortKey; 6] {
        [
            RosterSortKey::Mrn,
            RosterSortKey::FirstName,
            RosterSortKey::LastName,
            RosterSortKey::Dob,
            RosterSortKey::EnrollmentDate,
            RosterSortKey::CareManager,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn session_type_round_trip() {
        for (variant, s) in [
            (SessionType::InClinic, "in_clinic"),
            (SessionType::ByPhone, "by_phone"),
            (SessionType::ByVideo, "by_video"),
            (SessionType::InGroup, "in_group"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SessionType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn roster_sort_key_round_trip() {
        for (variant, s) in [
            (RosterSortKey::Mrn, "mrn"),
            (RosterSortKey::FirstName, "firstName"),
            (RosterSortKey::LastName, "lastName"),
            (RosterSortKey::Dob, "dob"),
            (RosterSortKey::EnrollmentDate, "enrollmentDate"),
            (RosterSortKey::CareManager, "careManager"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RosterSortKey::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn admin_tab_from_query_defaults() {
        assert_eq!(AdminTab::from_query(None), AdminTab::Clinics);
        assert_eq!(AdminTab::from_query(Some("clinics")), AdminTab::Clinics);
        assert_eq!(AdminTab::from_query(Some("users")), AdminTab::Users);
        assert_eq!(AdminTab::from_query(Some("billing")), AdminTab::Settings);
        assert_eq!(AdminTab::from_query(Some("")), AdminTab::Settings);
    }

    #[test]
    fn sort_direction_toggles() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&SessionType::InClinic).unwrap();
        assert_eq!(json, "\"in_clinic\"");
        let parsed: SessionType = serde_json::from_str("\"by_phone\"").unwrap();
        assert_eq!(parsed, SessionType::ByPhone);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(SessionType::from_str("in_person").is_err());
        assert!(SortDirection::from_str("up").is_err());
        assert!(RosterSortKey::from_str("").is_err());
    }
}
