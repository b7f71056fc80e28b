//! API route configuration.

use crate::api::handlers::{create_user_handler, get_user_handler, list_users_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// User API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /users`            - List all users (cached)
/// - `POST /users`            - Create a user
/// - `GET  /users/{user_id}`  - Fetch one user
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/{user_id}", get(get_user_handler))
}
