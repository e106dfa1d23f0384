use serde::{Deserialize, Serialize};

use crate::models::clinic::ClinicSummary;

/// Portal role. The backend stores roles as free strings; anything
/// other than `"Admin"` behaves as a standard clinical user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    StandardUser,
}

impl Role {
    pub fn from_name(name: &str) -> Self {
        if name == "Admin" {
            Role::Admin
        } else {
            Role::StandardUser
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::StandardUser => "StandardUser",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Role::from_name(&name))
    }
}

/// Signed-in user as returned by `GET /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub clinics: Vec<ClinicSummary>,
}

/// Care-manager or psychiatric-consultant entry from the staff lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffOption {
    pub id: i64,
    pub name: String,
}
