//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UserService;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUserRepository;

/// Process-wide resources, built once at startup.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService<PgUserRepository>>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            user_service,
            cache,
        }
    }
}
