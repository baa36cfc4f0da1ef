//! 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::filters;
use crate::routes::layout::LayoutView;

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate {
    pub layout: LayoutView,
    pub heading: String,
    pub message: String,
}

/// Render the 404 page with a custom heading and message.
pub async fn page(session: &Session, heading: &str, message: &str) -> Response {
    let template = NotFoundTemplate {
        layout: LayoutView::for_session(session).await,
        heading: heading.to_string(),
        message: message.to_string(),
    };
    (StatusCode::NOT_FOUND, template).into_response()
}

/// Fallback for unmatched routes.
pub async fn fallback(session: Session, uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    page(
        &session,
        "Page Not Found",
        "The page you are looking for doesn't exist or has been moved.",
    )
    .await
}
