//! Reading endpoints
//!
//! Every dataset exposes the same pair of routes. `all` returns the whole
//! table; `filtered` applies the predicate built from the query string.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::ApiError;
use crate::data::filters::{RequestParameters, build_predicate};
use crate::data::{Dataset, ReadingsStore};

/// Shared state for reading endpoints
#[derive(Clone)]
pub struct ReadingsApiState {
    pub store: Arc<ReadingsStore>,
}

/// Build reading routes (nested under `/api/v1/resources`)
pub fn routes(store: Arc<ReadingsStore>) -> Router<()> {
    let state = ReadingsApiState { store };

    Router::new()
        .route("/{dataset}/all", get(list_all))
        .route("/{dataset}/filtered", get(list_filtered))
        .with_state(state)
}

fn parse_dataset(slug: &str) -> Result<Dataset, ApiError> {
    slug.parse().map_err(|_| {
        ApiError::not_found(
            "DATASET_NOT_FOUND",
            format!("Unknown dataset: {slug}. Expected air-quality, solar or darksky"),
        )
    })
}

/// Readings change as sensors report, so responses are never cached
fn no_store() -> [(header::HeaderName, HeaderValue); 1] {
    [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))]
}

/// Return every row of a dataset
#[utoipa::path(
    get,
    path = "/api/v1/resources/{dataset}/all",
    tag = "readings",
    params(
        ("dataset" = String, Path, description = "air-quality, solar or darksky")
    ),
    responses(
        (status = 200, description = "All rows as JSON objects keyed by column", content_type = "application/json"),
        (status = 404, description = "Unknown dataset", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Database error", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn list_all(
    State(state): State<ReadingsApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset = parse_dataset(&slug)?;

    let rows = state
        .store
        .fetch(dataset, None)
        .await
        .map_err(ApiError::from_sqlite)?;

    tracing::debug!(%dataset, rows = rows.len(), "Listed all readings");
    Ok((no_store(), Json(rows)))
}

/// Return the rows of a dataset matching the query filters
#[utoipa::path(
    get,
    path = "/api/v1/resources/{dataset}/filtered",
    tag = "readings",
    params(
        ("dataset" = String, Path, description = "air-quality, solar or darksky"),
        ("daysago" = Option<String>, Query, description = "Positive day count; selects the one-day window starting that many days ago. Overrides the date and time keys"),
        ("sdate" = Option<String>, Query, description = "Earliest date, YYYY-MM-DD"),
        ("edate" = Option<String>, Query, description = "Latest date, YYYY-MM-DD"),
        ("stime" = Option<String>, Query, description = "Earliest time, HH:MM:00"),
        ("etime" = Option<String>, Query, description = "Latest time, HH:MM:00"),
        ("param" = Option<String>, Query, description = "Comma-separated parameter names")
    ),
    responses(
        (status = 200, description = "Matching rows as JSON objects keyed by column", content_type = "application/json"),
        (status = 400, description = "Malformed filter", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Unknown dataset", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Database error", body = crate::api::types::ErrorResponse)
    )
)]
pub async fn list_filtered(
    State(state): State<ReadingsApiState>,
    Path(slug): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset = parse_dataset(&slug)?;
    let params = RequestParameters::from_pairs(pairs);
    let predicate = build_predicate(&params)?;

    let rows = state
        .store
        .fetch(dataset, Some(&predicate))
        .await
        .map_err(ApiError::from_sqlite)?;

    tracing::debug!(%dataset, rows = rows.len(), "Listed filtered readings");
    Ok((no_store(), Json(rows)))
}
