//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`        - Liveness probe (fixed payload)
//! - `GET /health/ready`  - Readiness probe: database and cache
//! - `/api/*`             - User API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, readiness_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler))
        .nest("/api", api::routes::user_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`build_router`] with trailing-slash normalization.
///
/// Path normalization must run before routing, so it wraps the whole router
/// instead of being added as a route layer.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
