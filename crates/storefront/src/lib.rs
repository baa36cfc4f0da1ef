//! Essence storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. The binary in `main.rs` only wires
//! configuration, tracing, Sentry and the session store around [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::Request;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Directory holding CSS, JS and other static assets.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router without state or session layer.
///
/// Callers add a `tower_sessions::SessionManagerLayer` for their store of
/// choice and then provide the [`AppState`].
///
/// # Middleware Order (outermost first)
///
/// 1. `TraceLayer` (request span)
/// 2. Request ID (recorded on the span, echoed in the response)
/// 3. Security headers
#[must_use]
pub fn app() -> Router<AppState> {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(routes::not_found::fallback)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}
