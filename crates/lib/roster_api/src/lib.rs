//! # roster_api
//!
//! HTTP API library for Roster.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use roster_core::auth::credentials::CredentialVerifier;
use roster_core::auth::jwt::TokenService;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::AppResult;
use crate::handlers::{account, employees, health, roles};
use crate::middleware::auth::{authenticate, require_admin, require_auth};
use crate::middleware::errors::with_error_boundary;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
    /// Identity token issuer/verifier built from `config.token`.
    pub tokens: Arc<TokenService>,
    /// Credential check used by the login flow.
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Build state from configuration, using the configured credential store.
    pub fn new(pool: SqlitePool, config: ApiConfig) -> AppResult<Self> {
        let credentials = services::auth::credentials_from_config(&config)?;
        Self::with_credentials(pool, config, Arc::new(credentials))
    }

    /// Build state with an explicit credential verifier.
    pub fn with_credentials(
        pool: SqlitePool,
        config: ApiConfig,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::new(&config.token)?);
        Ok(Self {
            pool,
            config,
            tokens,
            credentials,
        })
    }
}

/// Run embedded database migrations.
///
/// Delegates to `roster_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    roster_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public = Router::new()
        .route("/health", get(health::health))
        .route(
            "/account/login",
            get(account::login_page).post(account::login_handler),
        )
        .route("/account/logout", post(account::logout_handler))
        .route("/account/access-denied", get(account::access_denied));

    // Protected routes (any authenticated identity)
    let protected = Router::new()
        .route("/account/secure", get(account::secure_page))
        .route("/employees", get(employees::index))
        .route(
            "/employees/create",
            get(employees::create_page).post(employees::create_handler),
        )
        .route("/employees/{id}", get(employees::details))
        .route(
            "/employees/{id}/edit",
            get(employees::edit_page).post(employees::edit_handler),
        )
        .route(
            "/employees/{id}/delete",
            get(employees::delete_page).post(employees::delete_handler),
        )
        .route("/roles", get(roles::list_roles))
        .route("/roles/{id}/employees", get(roles::role_members))
        .route_layer(axum::middleware::from_fn(require_auth));

    // Admin routes
    let admin = Router::new()
        .route("/account/admin", get(account::admin_page))
        .route("/roles/create", post(roles::create_role))
        .route("/roles/{id}/delete", post(roles::delete_role))
        .route_layer(axum::middleware::from_fn(require_admin));

    let app = Router::new()
        .merge(public)
        .merge(protected)
        .merge(admin)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    with_error_boundary(app)
}
