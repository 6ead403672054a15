//! Authentication middleware — cookie extraction, token verification and
//! per-route requirements.
//!
//! `authenticate` runs on every request and always inserts an `AuthContext`.
//! The `require_*` gates sit on protected routes only.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::ACCEPT},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use roster_core::auth::credentials::ADMIN_ROLE;
use roster_core::auth::gate::{AccessDenied, AuthContext, Requirement};
use roster_core::models::auth::TokenClaims;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::AUTH_COOKIE;

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/account/login";
/// Where forbidden page requests are sent.
pub const ACCESS_DENIED_PATH: &str = "/account/access-denied";

/// Claims of a caller that passed a route's requirement.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

/// Axum middleware: reads the `AuthToken` cookie, verifies it, and inserts the
/// resulting `AuthContext` into request extensions. Never rejects.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = CookieJar::from_headers(request.headers())
        .get(AUTH_COOKIE)
        .and_then(|cookie| state.tokens.verify(cookie.value()));
    request.extensions_mut().insert(AuthContext::from(claims));
    next.run(request).await
}

/// Gate: any authenticated identity.
pub async fn require_auth(request: Request, next: Next) -> Response {
    require(Requirement::Authenticated, request, next).await
}

/// Gate: the `Admin` role.
pub async fn require_admin(request: Request, next: Next) -> Response {
    require(Requirement::role(ADMIN_ROLE), request, next).await
}

/// Evaluate `requirement` against the request's `AuthContext`. On success the
/// claims are inserted as `AuthenticatedUser` for the handler.
pub async fn require(requirement: Requirement, mut request: Request, next: Next) -> Response {
    let context = request
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or_default();

    match requirement.check(&context) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser(claims.clone()));
            next.run(request).await
        }
        Err(denied) => {
            debug!(path = %request.uri().path(), ?denied, ?requirement, "request denied");
            deny(denied, is_page_request(request.headers()))
        }
    }
}

/// Page requests are redirected; everything else gets a 401/403 body.
fn deny(denied: AccessDenied, page: bool) -> Response {
    match (denied, page) {
        (AccessDenied::Unauthenticated, true) => Redirect::to(LOGIN_PATH).into_response(),
        (AccessDenied::Forbidden, true) => Redirect::to(ACCESS_DENIED_PATH).into_response(),
        (AccessDenied::Unauthenticated, false) => {
            AppError::Unauthorized("Authentication required".into()).into_response()
        }
        (AccessDenied::Forbidden, false) => {
            AppError::Forbidden("Insufficient role".into()).into_response()
        }
    }
}

/// A request is a page request when it accepts HTML.
pub fn is_page_request(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
