//! Error boundary — the single place where unhandled faults are logged and
//! replaced by the generic error page.

use std::any::Any;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::error::{AppError, Fault};

/// Wrap every route of `router` in the error boundary.
pub fn with_error_boundary(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(error_boundary))
}

/// Logs the request path and fault message of any response carrying a `Fault`.
pub async fn error_boundary(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    if let Some(Fault(message)) = response.extensions().get::<Fault>() {
        error!(path = %path, message = %message, "unhandled fault while processing request");
    }
    response
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(format!("panic: {message}")).into_response()
}
