//! Request and response models for the HTTP surface.
//!
//! Page responses are JSON view models; forms arrive URL-encoded.

use std::collections::BTreeMap;

use roster_core::models::employee::{Employee, EmployeeDraft, Role};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Field name → messages. The empty key holds form-level messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    pub db_connected: bool,
}

/// A named page with an optional message, for pages without a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub view: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PageResponse {
    pub fn new(view: &str) -> Self {
        Self {
            view: view.to_string(),
            message: None,
        }
    }

    pub fn with_message(view: &str, message: &str) -> Self {
        Self {
            view: view.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub role_name: String,
}

impl From<Employee> for EmployeeView {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            role_id: e.role_id,
            role_name: e.role_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub id: i64,
    pub name: String,
}

impl From<Role> for RoleView {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleListResponse {
    pub roles: Vec<RoleView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMembersResponse {
    pub role: RoleView,
    pub employees: Vec<EmployeeView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDeletedResponse {
    pub role_id: i64,
    pub employees_removed: i64,
}

/// Employee details, edit and delete-confirmation pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePage {
    pub view: String,
    pub employee: EmployeeView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleView>>,
}

/// A create or edit form, returned empty or re-rendered with errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeFormPage<F> {
    pub view: String,
    pub form: Option<F>,
    pub roles: Vec<RoleView>,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name is required and must not exceed 100 characters."
    ))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "RoleId must be greater than 0."))]
    pub role_id: i64,
}

impl CreateEmployeeForm {
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditEmployeeForm {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name is required and must not exceed 100 characters."
    ))]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format."))]
    pub email: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "RoleId must be greater than 0."))]
    pub role_id: i64,
}

impl EditEmployeeForm {
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role_id,
        }
    }
}

impl From<Employee> for EditEmployeeForm {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            email: e.email,
            role_id: e.role_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRoleQuery {
    #[serde(default)]
    pub cascade: bool,
}

/// Form text fields are validated and stored without surrounding whitespace.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Flatten validator output into camelCase field keys.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), |m| m.to_string())
                })
                .collect();
            (camel_case(&field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
