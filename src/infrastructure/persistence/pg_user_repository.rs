//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.name, row.email)
    }
}

/// PostgreSQL repository for user records.
///
/// Each method acquires its own pooled connection and holds it only for the
/// duration of one statement. The `PoolConnection` guard returns the
/// connection to the pool when dropped, so release happens on success,
/// not-found and error paths alike.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut conn = self.pool.acquire().await?;

        // Insert and read back the committed row, including the generated id,
        // in one statement.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut conn = self.pool.acquire().await?;

        // No ORDER BY: callers get storage order.
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users")
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.pool.acquire().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
