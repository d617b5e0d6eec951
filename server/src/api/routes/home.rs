//! Landing page

use axum::response::Html;

const HOME_HTML: &str = "<h1>The Integral Urban Home API</h1>";

/// Static HTML banner at `/`
pub async fn home() -> Html<&'static str> {
    Html(HOME_HTML)
}
