//! Employee and role records.

use serde::{Deserialize, Serialize};

/// Names of the roles seeded at store initialization.
pub const SEEDED_ROLES: [&str; 3] = ["Admin", "Manager", "Staff"];

/// Maximum length of employee and role names.
pub const MAX_NAME_LEN: usize = 100;

/// A persisted employee with its role resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub role_name: String,
}

impl Employee {
    /// The mutable fields of this employee, without id or resolved role.
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role_id,
        }
    }
}

/// Employee fields supplied by a caller. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub role_id: i64,
}

/// A role. The employees holding it are looked up on demand, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// What to do with employees still assigned to a role being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleDeletePolicy {
    /// Refuse to delete a role that is still assigned.
    #[default]
    Restrict,
    /// Delete the role and every employee assigned to it.
    Cascade,
}
