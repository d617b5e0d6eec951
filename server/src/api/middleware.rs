//! HTTP middleware (404 handler)

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

const NOT_FOUND_HTML: &str = "<h1>404</h1><p>The resource could not be found.</p>";

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] No route matched");
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML))
}
