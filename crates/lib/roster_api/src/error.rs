//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_core::auth::AuthError;
use roster_core::employees::EmployeeError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Message shown in place of any internal fault.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing your request.";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

/// The original message of an internal fault, attached to the response so the
/// error boundary can log it. Never serialized.
#[derive(Debug, Clone)]
pub struct Fault(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                GENERIC_ERROR_MESSAGE,
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        let mut response = (status, body).into_response();
        if let AppError::Internal(fault) = self {
            response.extensions_mut().insert(Fault(fault));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::Config(msg) => AppError::Internal(format!("configuration: {msg}")),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<EmployeeError> for AppError {
    fn from(e: EmployeeError) -> Self {
        match e {
            EmployeeError::NotFound(id) => AppError::NotFound(format!("Employee {id} not found")),
            EmployeeError::RoleNotFound(id) => AppError::NotFound(format!("Role {id} not found")),
            EmployeeError::InvalidRole(id) => AppError::Validation(format!("Unknown role {id}")),
            e @ EmployeeError::RoleInUse { .. } => AppError::Conflict(e.to_string()),
            e @ EmployeeError::DuplicateRole(_) => AppError::Conflict(e.to_string()),
            EmployeeError::Validation(msg) => AppError::Validation(msg),
            EmployeeError::DbError(e) => AppError::from(e),
        }
    }
}
