//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware;
use super::openapi::openapi_json;
use super::routes::{health, home, readings};
use crate::core::CoreApp;
use crate::data::ReadingsStore;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);
        let router = router(app.store.clone(), app.config.debug);

        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(%addr, "Listener bound");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}

/// Build the full application router
///
/// In debug mode request spans and responses are logged at INFO so they show
/// up under the default filter.
pub fn router(store: Arc<ReadingsStore>, debug: bool) -> Router {
    let trace_level = if debug { Level::INFO } else { Level::DEBUG };

    Router::new()
        .route("/", get(home::home))
        .route("/api/v1/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .nest("/api/v1/resources", readings::routes(store))
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(trace_level))
                .on_response(DefaultOnResponse::new().level(trace_level)),
        )
}
