//! Authentication and authorization logic.
//!
//! Provides password hashing, identity token management, pluggable
//! credential verification and the per-request authorization gate, shared
//! by `roster_api` and `roster_cli`.

pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
