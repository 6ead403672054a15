//! API server configuration.

use roster_core::auth::AuthError;
use roster_core::auth::jwt::TokenSettings;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// Token signing key, issuer and audience.
    pub token: TokenSettings,
    /// Username of the configured administrator account.
    pub admin_username: String,
    /// bcrypt hash of the administrator password. `None` selects the
    /// development account.
    pub admin_password_hash: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable                     | Default              |
    /// |------------------------------|----------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:8080`     |
    /// | `DATABASE_URL`               | `sqlite://roster.db` |
    /// | `JWT_KEY`                    | required (≥32 bytes) |
    /// | `JWT_ISSUER`                 | required             |
    /// | `JWT_AUDIENCE`               | required             |
    /// | `ROSTER_ADMIN_USERNAME`      | `admin`              |
    /// | `ROSTER_ADMIN_PASSWORD_HASH` | development account  |
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://roster.db".into()),
            token: TokenSettings::from_env()?,
            admin_username: std::env::var("ROSTER_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".into()),
            admin_password_hash: std::env::var("ROSTER_ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|h| !h.is_empty()),
        })
    }
}
