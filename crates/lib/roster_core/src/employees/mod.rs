//! Employee and role persistence.
//!
//! Queries run against the shared SQLite pool. Callers receive transient
//! copies; the store owns the records.

pub mod queries;

use thiserror::Error;

/// Employee and role errors.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee not found: {0}")]
    NotFound(i64),

    #[error("Role not found: {0}")]
    RoleNotFound(i64),

    #[error("Invalid role: {0}")]
    InvalidRole(i64),

    #[error("Role {role_id} is still assigned to {employees} employee(s)")]
    RoleInUse { role_id: i64, employees: i64 },

    #[error("Role already exists: {0}")]
    DuplicateRole(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
