//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the session database is reachable. Returns 503 Service
/// Unavailable if it is not. Without a database pool (in-memory sessions)
/// the storefront is always ready.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.session_pool() else {
        return StatusCode::OK;
    };

    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Session database not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
