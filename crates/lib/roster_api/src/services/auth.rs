//! Authentication service — the login flow over a pluggable credential verifier.

use roster_core::auth::credentials::{
    ADMIN_ROLE, Account, CredentialVerifier, DEV_USERNAME, StaticCredentials,
};
use roster_core::auth::jwt::TokenService;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Check the submitted credentials and mint a token for the matching identity.
///
/// Empty fields and mismatches are both `Unauthorized`, with the same message.
pub async fn login(
    credentials: &dyn CredentialVerifier,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> AppResult<String> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let Some(identity) = credentials.verify(username, password).await? else {
        info!(username, "login rejected");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    let token = tokens.generate_token(&identity.username, &identity.role)?;
    info!(username = %identity.username, role = %identity.role, "login succeeded");
    Ok(token)
}

/// Build the credential store described by `config`.
///
/// Without a configured password hash the development account
/// (`admin` / `password`) is used.
pub fn credentials_from_config(config: &ApiConfig) -> AppResult<StaticCredentials> {
    match &config.admin_password_hash {
        Some(hash) => Ok(StaticCredentials::new(vec![Account {
            username: config.admin_username.clone(),
            password_hash: hash.clone(),
            role: ADMIN_ROLE.into(),
        }])),
        None => {
            warn!(
                username = DEV_USERNAME,
                "ROSTER_ADMIN_PASSWORD_HASH not set, using the development account"
            );
            Ok(StaticCredentials::development()?)
        }
    }
}
