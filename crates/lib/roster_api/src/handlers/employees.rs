//! Employee request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use roster_core::employees::EmployeeError;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;
use validator::Validate;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateEmployeeForm, EditEmployeeForm, EmployeeFormPage, EmployeeListResponse, EmployeePage,
    FieldErrors, RoleView, field_errors,
};
use crate::services::employees::{self, UPDATE_FAILED_MESSAGE};

/// Employee list, the landing page after login.
pub const EMPLOYEES_PATH: &str = "/employees";

const CREATE_VIEW: &str = "employees/create";
const EDIT_VIEW: &str = "employees/edit";

async fn role_views(pool: &SqlitePool) -> AppResult<Vec<RoleView>> {
    Ok(employees::list_roles(pool)
        .await?
        .into_iter()
        .map(RoleView::from)
        .collect())
}

/// Re-render a form with its errors (422).
async fn rerender<F: Serialize>(
    pool: &SqlitePool,
    view: &str,
    form: F,
    errors: FieldErrors,
) -> AppResult<Response> {
    let page = EmployeeFormPage {
        view: view.to_string(),
        form: Some(form),
        roles: role_views(pool).await?,
        errors,
    };
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
}

/// `GET /employees` — every employee with its role.
pub async fn index(State(state): State<AppState>) -> AppResult<Json<EmployeeListResponse>> {
    let employees = employees::list_employees(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(EmployeeListResponse { employees }))
}

/// `GET /employees/create` — empty form plus the roles to choose from.
pub async fn create_page(
    State(state): State<AppState>,
) -> AppResult<Json<EmployeeFormPage<CreateEmployeeForm>>> {
    Ok(Json(EmployeeFormPage {
        view: CREATE_VIEW.to_string(),
        form: None,
        roles: role_views(&state.pool).await?,
        errors: FieldErrors::new(),
    }))
}

/// `POST /employees/create` — validate, insert, back to the list.
pub async fn create_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateEmployeeForm>,
) -> AppResult<Response> {
    if let Err(e) = form.validate() {
        return rerender(&state.pool, CREATE_VIEW, form, field_errors(&e)).await;
    }

    match employees::add_employee(&state.pool, &form.draft()).await {
        Ok(_) => Ok(Redirect::to(EMPLOYEES_PATH).into_response()),
        Err(EmployeeError::InvalidRole(_)) => {
            let errors = FieldErrors::from([(
                "roleId".to_string(),
                vec!["Selected role does not exist.".to_string()],
            )]);
            rerender(&state.pool, CREATE_VIEW, form, errors).await
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /employees/{id}` — details.
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeePage>> {
    let employee = employees::find_employee(&state.pool, id).await?;
    Ok(Json(EmployeePage {
        view: "employees/details".to_string(),
        employee: employee.into(),
        roles: None,
    }))
}

/// `GET /employees/{id}/edit` — the employee plus the roles to choose from.
pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeePage>> {
    let employee = employees::find_employee(&state.pool, id).await?;
    Ok(Json(EmployeePage {
        view: EDIT_VIEW.to_string(),
        employee: employee.into(),
        roles: Some(role_views(&state.pool).await?),
    }))
}

/// `POST /employees/{id}/edit` — the form id must match the path id.
///
/// A store failure is logged and shown as a retry message on the form.
pub async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditEmployeeForm>,
) -> AppResult<Response> {
    if id != form.id {
        return Err(AppError::Validation(format!(
            "Employee id {} does not match the requested id {id}",
            form.id
        )));
    }
    if let Err(e) = form.validate() {
        return rerender(&state.pool, EDIT_VIEW, form, field_errors(&e)).await;
    }

    match employees::update_employee(&state.pool, id, &form.draft()).await {
        Ok(()) => Ok(Redirect::to(EMPLOYEES_PATH).into_response()),
        Err(EmployeeError::NotFound(_)) => {
            Err(AppError::NotFound(format!("Employee {id} not found")))
        }
        Err(e) => {
            error!(id, error = %e, "employee update failed");
            let errors =
                FieldErrors::from([(String::new(), vec![UPDATE_FAILED_MESSAGE.to_string()])]);
            rerender(&state.pool, EDIT_VIEW, form, errors).await
        }
    }
}

/// `GET /employees/{id}/delete` — confirmation step.
pub async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeePage>> {
    let employee = employees::find_employee(&state.pool, id).await?;
    Ok(Json(EmployeePage {
        view: "employees/delete".to_string(),
        employee: employee.into(),
        roles: None,
    }))
}

/// `POST /employees/{id}/delete` — delete and go back to the list. A missing
/// employee is not an error.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    employees::delete_employee(&state.pool, id).await?;
    Ok(Redirect::to(EMPLOYEES_PATH))
}
