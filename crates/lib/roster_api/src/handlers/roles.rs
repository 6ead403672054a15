//! Role request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CreateRoleForm, DeleteRoleQuery, RoleDeletedResponse, RoleListResponse, RoleMembersResponse,
    RoleView,
};
use crate::services::employees;

/// `GET /roles` — every role, for selection inputs.
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<RoleListResponse>> {
    let roles = employees::list_roles(&state.pool)
        .await?
        .into_iter()
        .map(RoleView::from)
        .collect();
    Ok(Json(RoleListResponse { roles }))
}

/// `GET /roles/{id}/employees` — employees currently holding the role.
pub async fn role_members(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RoleMembersResponse>> {
    let (role, members) = employees::role_members(&state.pool, id).await?;
    Ok(Json(RoleMembersResponse {
        role: role.into(),
        employees: members.into_iter().map(Into::into).collect(),
    }))
}

/// `POST /roles/create` — add a role. Admin only.
pub async fn create_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Form(form): Form<CreateRoleForm>,
) -> AppResult<(StatusCode, Json<RoleView>)> {
    let role = employees::add_role(&state.pool, &form.name).await?;
    info!(by = %user.0.sub, role = %role.name, "role created");
    Ok((StatusCode::CREATED, Json(role.into())))
}

/// `POST /roles/{id}/delete?cascade=true|false` — delete a role. Admin only.
///
/// Without `cascade=true` a role that is still assigned is refused (409).
pub async fn delete_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteRoleQuery>,
) -> AppResult<Json<RoleDeletedResponse>> {
    let removed = employees::delete_role(&state.pool, id, query.cascade).await?;
    info!(by = %user.0.sub, role_id = id, removed, "role deleted");
    Ok(Json(RoleDeletedResponse {
        role_id: id,
        employees_removed: removed,
    }))
}
