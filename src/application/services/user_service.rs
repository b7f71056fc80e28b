//! User directory service with a read-through list cache.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use serde_json::json;

/// Cache key holding the JSON-serialized list of all users.
pub const USERS_CACHE_KEY: &str = "users:all";

/// Default lifetime of the cached user list.
pub const DEFAULT_USERS_CACHE_TTL: Duration = Duration::from_secs(300);

/// Service for creating and reading users.
///
/// The full user list is cached under [`USERS_CACHE_KEY`]. Reads are served
/// from the cache while the entry lives; creating a user deletes the entry so
/// the next list observes the new row. Single-user lookups always go to
/// storage.
///
/// Cache failures are not masked: a failing cache fails the operation.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    list_ttl: Duration,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, list_ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            list_ttl,
        }
    }

    /// Returns all users.
    ///
    /// A cache hit is returned without touching storage, so the result may
    /// lag behind storage by up to the list TTL. On a miss the list is read
    /// from storage and written back to the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on cache or database errors, including a
    /// cached entry that does not decode; storage is not consulted then.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        if let Some(blob) = self.cache.get(USERS_CACHE_KEY).await? {
            return serde_json::from_str::<Vec<User>>(&blob).map_err(|e| {
                AppError::internal(
                    "Unreadable cache entry",
                    json!({ "key": USERS_CACHE_KEY, "reason": e.to_string() }),
                )
            });
        }

        let users = self.repository.list().await?;

        let blob = serde_json::to_string(&users).map_err(|e| {
            AppError::internal("Failed to serialize user list", json!({ "reason": e.to_string() }))
        })?;
        self.cache.set(USERS_CACHE_KEY, &blob, self.list_ttl).await?;

        Ok(users)
    }

    /// Persists a new user and invalidates the cached list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if storage rejects the write (for
    /// example a duplicate email); the cache is left untouched in that case.
    /// Also returns [`AppError::Internal`] if the invalidation fails.
    pub async fn create_user(&self, name: String, email: String) -> Result<User, AppError> {
        let created = self.repository.create(NewUser { name, email }).await?;

        self.cache.delete(USERS_CACHE_KEY).await?;
        tracing::info!(user_id = created.id, "User created");

        Ok(created)
    }

    /// Retrieves a user by id, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] with message `User not found` if no row matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Checks that storage answers a trivial query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the database is unreachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
