//! Employee and role database queries.

use sqlx::SqlitePool;
use tracing::info;

use super::EmployeeError;
use crate::models::employee::{Employee, EmployeeDraft, MAX_NAME_LEN, Role, RoleDeletePolicy};

type EmployeeRow = (i64, String, String, i64, String);

const SELECT_EMPLOYEE: &str = "SELECT e.id, e.name, e.email, e.role_id, r.name \
     FROM employees e JOIN roles r ON r.id = e.role_id";

fn employee_from_row((id, name, email, role_id, role_name): EmployeeRow) -> Employee {
    Employee {
        id,
        name,
        email,
        role_id,
        role_name,
    }
}

/// List every employee with its role resolved, ordered by id.
pub async fn list_employees(pool: &SqlitePool) -> Result<Vec<Employee>, EmployeeError> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_EMPLOYEE} ORDER BY e.id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(employee_from_row).collect())
}

/// Fetch one employee. A missing id is `Ok(None)`.
pub async fn get_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, EmployeeError> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_EMPLOYEE} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(employee_from_row))
}

/// Insert a new employee, returning it with the store-assigned id.
pub async fn add_employee(
    pool: &SqlitePool,
    draft: &EmployeeDraft,
) -> Result<Employee, EmployeeError> {
    if !role_exists(pool, draft.role_id).await? {
        return Err(EmployeeError::InvalidRole(draft.role_id));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (name, email, role_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&draft.name)
    .bind(&draft.email)
    .bind(draft.role_id)
    .fetch_one(pool)
    .await?;

    info!(id, role_id = draft.role_id, "employee added");
    get_employee(pool, id)
        .await?
        .ok_or(EmployeeError::NotFound(id))
}

/// Replace the mutable fields of employee `id`.
///
/// Store failures (e.g. a role reference the foreign key rejects) surface as
/// `DbError`; they are not retried.
pub async fn update_employee(
    pool: &SqlitePool,
    id: i64,
    draft: &EmployeeDraft,
) -> Result<(), EmployeeError> {
    let result = sqlx::query("UPDATE employees SET name = ?, email = ?, role_id = ? WHERE id = ?")
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(draft.role_id)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(EmployeeError::NotFound(id));
    }
    info!(id, "employee updated");
    Ok(())
}

/// Delete employee `id`. Deleting an id that does not exist is a no-op.
///
/// Returns whether a row was removed.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> Result<bool, EmployeeError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let removed = result.rows_affected() > 0;
    if removed {
        info!(id, "employee deleted");
    }
    Ok(removed)
}

/// List all roles, ordered by id.
pub async fn list_roles(pool: &SqlitePool) -> Result<Vec<Role>, EmployeeError> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Role { id, name }).collect())
}

/// Fetch one role.
pub async fn get_role(pool: &SqlitePool, id: i64) -> Result<Option<Role>, EmployeeError> {
    let row = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id, name)| Role { id, name }))
}

/// Check whether a role id exists.
pub async fn role_exists(pool: &SqlitePool, id: i64) -> Result<bool, EmployeeError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE id = ?)")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a role with a unique, non-empty name of at most 100 characters.
pub async fn add_role(pool: &SqlitePool, name: &str) -> Result<Role, EmployeeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EmployeeError::Validation("Role name is required.".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(EmployeeError::Validation(format!(
            "Role name must not exceed {MAX_NAME_LEN} characters."
        )));
    }

    let taken = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE name = ?)")
        .bind(name)
        .fetch_one(pool)
        .await?;
    if taken {
        return Err(EmployeeError::DuplicateRole(name.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>("INSERT INTO roles (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    info!(id, name, "role added");
    Ok(Role {
        id,
        name: name.to_string(),
    })
}

/// Employees currently holding role `role_id`, ordered by id.
pub async fn employees_in_role(
    pool: &SqlitePool,
    role_id: i64,
) -> Result<Vec<Employee>, EmployeeError> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "{SELECT_EMPLOYEE} WHERE e.role_id = ? ORDER BY e.id"
    ))
    .bind(role_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(employee_from_row).collect())
}

/// Delete role `role_id` under `policy`, returning how many employees went with it.
pub async fn delete_role(
    pool: &SqlitePool,
    role_id: i64,
    policy: RoleDeletePolicy,
) -> Result<i64, EmployeeError> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE id = ?)")
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await?;
    if !exists {
        return Err(EmployeeError::RoleNotFound(role_id));
    }

    let employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE role_id = ?")
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await?;
    if employees > 0 && policy == RoleDeletePolicy::Restrict {
        return Err(EmployeeError::RoleInUse { role_id, employees });
    }

    sqlx::query("DELETE FROM roles WHERE id = ?")
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(role_id, employees, ?policy, "role deleted");
    Ok(employees)
}
