mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use users_service::routes::build_router;

#[sqlx::test]
async fn test_health_fixed_payload(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool);
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy", "service": "sample-fastapi-app" }));
}

#[sqlx::test]
async fn test_readiness_all_ok(pool: PgPool) {
    let (state, cache) = common::create_test_state(pool);
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(cache.is_empty().await);
}

#[sqlx::test]
async fn test_readiness_database_down(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = TestServer::new(build_router(state)).unwrap();

    pool.close().await;

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
