#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use users_service::application::services::UserService;
use users_service::infrastructure::cache::{CacheService, MemoryCache};
use users_service::infrastructure::persistence::PgUserRepository;
use users_service::state::AppState;

pub const TEST_TTL: Duration = Duration::from_secs(300);

pub async fn insert_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds state backed by the test database and an in-process cache.
///
/// The cache is returned as well so tests can inspect it.
pub fn create_test_state(pool: PgPool) -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());
    let state = create_test_state_with_cache(pool, cache.clone());
    (state, cache)
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let user_service = Arc::new(UserService::new(repository, cache.clone(), TEST_TTL));

    AppState::new(user_service, cache)
}
