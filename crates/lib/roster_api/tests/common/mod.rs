//! Shared helpers for router integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use roster_api::{AppState, config::ApiConfig};
use roster_core::auth::credentials::StaticCredentials;
use roster_core::auth::jwt::TokenSettings;
use tower::ServiceExt;

pub const SIGNING_KEY: &str = "router-tests-signing-key-0123456789abcdef";

pub fn token_settings() -> TokenSettings {
    TokenSettings {
        key: SIGNING_KEY.into(),
        issuer: "roster-tests".into(),
        audience: "roster-browser".into(),
    }
}

pub fn config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        token: token_settings(),
        admin_username: "admin".into(),
        admin_password_hash: None,
    }
}

/// State over a fresh in-memory store with the development account.
pub async fn state() -> AppState {
    let pool = roster_core::db::open_in_memory()
        .await
        .expect("in-memory store");
    let credentials = StaticCredentials::development().expect("development credentials");
    AppState::with_credentials(pool, config(), Arc::new(credentials)).expect("app state")
}

pub async fn app() -> (Router, AppState) {
    let state = state().await;
    (roster_api::router(state.clone()), state)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("AuthToken={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get_page(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut req = get(uri, token);
    req.headers_mut()
        .insert(ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
    req
}

pub fn post_form(uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("AuthToken={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn set_cookies(resp: &Response<Body>) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

/// Log in as the development admin and return the issued token.
pub async fn login_admin(app: &Router) -> String {
    let resp = send(
        app,
        post_form("/account/login", "username=admin&password=password", None),
    )
    .await;
    assert_eq!(StatusCode::SEE_OTHER, resp.status());

    let cookie = set_cookies(&resp)
        .into_iter()
        .find(|c| c.starts_with("AuthToken="))
        .expect("auth cookie set");
    cookie["AuthToken=".len()..]
        .split(';')
        .next()
        .unwrap()
        .to_string()
}
