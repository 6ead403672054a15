//! Employee service — domain operations delegating to `roster_core::employees`.
//!
//! Reads map straight into `AppError`. Writes return `EmployeeError` so the
//! handlers can turn failures into form messages instead of error pages.

use roster_core::employees::{EmployeeError, queries};
use roster_core::models::employee::{Employee, EmployeeDraft, Role, RoleDeletePolicy};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// Form-level message shown when the store rejects an update.
pub const UPDATE_FAILED_MESSAGE: &str =
    "An error occurred while updating the employee. Please try again later.";

pub async fn list_employees(pool: &SqlitePool) -> AppResult<Vec<Employee>> {
    Ok(queries::list_employees(pool).await?)
}

/// `Ok(None)` when the employee does not exist.
pub async fn get_employee(pool: &SqlitePool, id: i64) -> AppResult<Option<Employee>> {
    Ok(queries::get_employee(pool, id).await?)
}

/// Like [`get_employee`], with a missing employee as `NotFound`.
pub async fn find_employee(pool: &SqlitePool, id: i64) -> AppResult<Employee> {
    get_employee(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

pub async fn add_employee(
    pool: &SqlitePool,
    draft: &EmployeeDraft,
) -> Result<Employee, EmployeeError> {
    queries::add_employee(pool, draft).await
}

pub async fn update_employee(
    pool: &SqlitePool,
    id: i64,
    draft: &EmployeeDraft,
) -> Result<(), EmployeeError> {
    queries::update_employee(pool, id, draft).await
}

/// Idempotent: deleting a missing employee succeeds.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> AppResult<()> {
    queries::delete_employee(pool, id).await?;
    Ok(())
}

pub async fn list_roles(pool: &SqlitePool) -> AppResult<Vec<Role>> {
    Ok(queries::list_roles(pool).await?)
}

pub async fn add_role(pool: &SqlitePool, name: &str) -> AppResult<Role> {
    Ok(queries::add_role(pool, name).await?)
}

/// The role and the employees currently holding it.
pub async fn role_members(pool: &SqlitePool, role_id: i64) -> AppResult<(Role, Vec<Employee>)> {
    let role = queries::get_role(pool, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;
    let employees = queries::employees_in_role(pool, role_id).await?;
    Ok((role, employees))
}

pub async fn delete_role(pool: &SqlitePool, role_id: i64, cascade: bool) -> AppResult<i64> {
    let policy = if cascade {
        RoleDeletePolicy::Cascade
    } else {
        RoleDeletePolicy::Restrict
    };
    Ok(queries::delete_role(pool, role_id, policy).await?)
}
