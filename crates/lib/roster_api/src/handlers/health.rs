//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health` — crate version and database connectivity.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        version: roster_core::version().to_string(),
        db_connected: roster_core::db::ping(&state.pool).await,
    })
}
