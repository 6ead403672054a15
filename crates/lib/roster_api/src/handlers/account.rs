//! Account request handlers: login, logout and the account landing pages.
//!
//! Login and logout are the only handlers that write the `AuthToken` cookie.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Extension, Form, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::AppState;
use crate::error::AppResult;
use crate::handlers::employees::EMPLOYEES_PATH;
use crate::middleware::auth::{AuthenticatedUser, LOGIN_PATH};
use crate::models::{LoginForm, PageResponse};
use crate::services::auth;
use crate::services::cookies::{auth_cookie, clear_auth_cookie};

/// `GET /account/login` — login page.
pub async fn login_page() -> Json<PageResponse> {
    Json(PageResponse::new("login"))
}

/// `POST /account/login` — check credentials, set the auth cookie and go to
/// the employee list. A mismatch is 401 and leaves cookies alone.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let token = auth::login(
        state.credentials.as_ref(),
        &state.tokens,
        &form.username,
        &form.password,
    )
    .await?;
    Ok((jar.add(auth_cookie(&token)), Redirect::to(EMPLOYEES_PATH)))
}

/// `POST /account/logout` — clear the auth cookie unconditionally.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(clear_auth_cookie()), Redirect::to(LOGIN_PATH))
}

/// `GET /account/access-denied` — landing page for forbidden page requests.
pub async fn access_denied() -> (StatusCode, Json<PageResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(PageResponse::with_message(
            "access-denied",
            "You do not have permission to view this page.",
        )),
    )
}

/// `GET /account/secure` — any authenticated identity.
pub async fn secure_page(Extension(_user): Extension<AuthenticatedUser>) -> &'static str {
    "Welcome to the secure page!"
}

/// `GET /account/admin` — `Admin` role only.
pub async fn admin_page(Extension(_user): Extension<AuthenticatedUser>) -> &'static str {
    "Welcome to the admin page!"
}
