//! Login, logout and cookie handling.

mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn valid_login_sets_cookie_and_redirects_to_employees() {
    let (app, state) = app().await;

    let resp = send(
        &app,
        post_form("/account/login", "username=admin&password=password", None),
    )
    .await;

    assert_eq!(StatusCode::SEE_OTHER, resp.status());
    assert_eq!(Some("/employees"), location(&resp));

    let cookies = set_cookies(&resp);
    assert_eq!(1, cookies.len());
    let cookie = &cookies[0];
    assert!(cookie.starts_with("AuthToken="), "cookie: {cookie}");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Expires="));

    let token = cookie["AuthToken=".len()..].split(';').next().unwrap();
    let claims = state.tokens.verify(token).expect("issued token verifies");
    assert_eq!("admin", claims.sub);
    assert_eq!("Admin", claims.role);
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized_and_set_no_cookie() {
    let (app, _) = app().await;

    let resp = send(
        &app,
        post_form("/account/login", "username=user&password=wrongpassword", None),
    )
    .await;

    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
    assert!(set_cookies(&resp).is_empty());
    let json = body_json(resp).await;
    assert_eq!("unauthorized", json["error"]);
}

#[tokio::test]
async fn missing_fields_are_unauthorized() {
    let (app, _) = app().await;
    let resp = send(&app, post_form("/account/login", "username=admin", None)).await;
    assert_eq!(StatusCode::UNAUTHORIZED, resp.status());
    assert!(set_cookies(&resp).is_empty());
}

#[tokio::test]
async fn logout_clears_cookie_even_when_anonymous() {
    let (app, _) = app().await;

    let resp = send(&app, post_form("/account/logout", "", None)).await;

    assert_eq!(StatusCode::SEE_OTHER, resp.status());
    assert_eq!(Some("/account/login"), location(&resp));
    let cookies = set_cookies(&resp);
    assert_eq!(1, cookies.len());
    assert!(cookies[0].starts_with("AuthToken=;"));
    assert!(cookies[0].contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_after_login_clears_cookie() {
    let (app, _) = app().await;
    let token = login_admin(&app).await;

    let resp = send(&app, post_form("/account/logout", "", Some(&token))).await;

    assert_eq!(StatusCode::SEE_OTHER, resp.status());
    let cookies = set_cookies(&resp);
    assert!(cookies.iter().any(|c| c.starts_with("AuthToken=;")));
}

#[tokio::test]
async fn login_page_leaves_cookies_alone() {
    let (app, _) = app().await;

    let resp = send(&app, get("/account/login", Some("stale"))).await;

    assert_eq!(StatusCode::OK, resp.status());
    assert!(set_cookies(&resp).is_empty());
    assert_eq!("login", body_json(resp).await["view"]);
}

#[tokio::test]
async fn logged_in_admin_reaches_secure_and_admin_pages() {
    let (app, _) = app().await;
    let token = login_admin(&app).await;

    let resp = send(&app, get("/account/secure", Some(&token))).await;
    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!("Welcome to the secure page!", body_text(resp).await);

    let resp = send(&app, get("/account/admin", Some(&token))).await;
    assert_eq!(StatusCode::OK, resp.status());
    assert_eq!("Welcome to the admin page!", body_text(resp).await);
}

#[tokio::test]
async fn health_reports_database() {
    let (app, _) = app().await;
    let resp = send(&app, get("/health", None)).await;
    assert_eq!(StatusCode::OK, resp.status());

    let json = body_json(resp).await;
    assert_eq!(true, json["dbConnected"]);
    assert_eq!(roster_core::version(), json["version"]);
}
