//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, readings};
use crate::api::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "The Integral Urban Home API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Read-only access to air quality, solar and Dark Sky readings"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "readings", description = "Sensor and forecast readings")
    ),
    paths(
        health::health,
        readings::list_all,
        readings::list_filtered,
    ),
    components(schemas(health::HealthResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON spec
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_reading_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/v1/health"));
        assert!(
            paths
                .iter()
                .any(|p| *p == "/api/v1/resources/{dataset}/all")
        );
        assert!(
            paths
                .iter()
                .any(|p| *p == "/api/v1/resources/{dataset}/filtered")
        );
    }
}
