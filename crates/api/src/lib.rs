//! HTTP API server for the Crafty product catalog.
//!
//! Provides REST endpoints for searching, reading, creating and seeding
//! products, plus liveness and diagnostics probes, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use document_store::DocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/api/hello", get(routes::health::hello))
        .route("/test", get(routes::diagnostics::report::<S>))
        .route(
            "/api/products",
            get(routes::products::list::<S>).post(routes::products::create::<S>),
        )
        .route("/api/products/{id}", get(routes::products::get::<S>))
        .route("/api/seed", post(routes::seed::seed::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
