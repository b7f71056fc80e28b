//! Handlers for health check endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthResponse, ReadinessChecks, ReadinessResponse};
use crate::state::AppState;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers `{"status":"healthy","service":"sample-fastapi-app"}`
/// without touching any backend.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "sample-fastapi-app",
    })
}

/// Readiness probe with backend checks.
///
/// # Endpoint
///
/// `GET /health/ready`
///
/// # Response Codes
///
/// - **200 OK**: Database and cache reachable
/// - **503 Service Unavailable**: At least one backend unreachable
pub async fn readiness_handler(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let database = check_database(&state).await;
    let cache = check_cache(&state).await;

    let all_ready = database.is_ok() && cache.is_ok();

    let response = ReadinessResponse {
        status: if all_ready { "ready" } else { "degraded" }.to_string(),
        checks: ReadinessChecks { database, cache },
    };

    if all_ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.user_service.check_storage().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Cache connected")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}
