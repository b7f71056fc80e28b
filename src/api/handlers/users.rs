//! Handlers for the user endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use crate::api::dto::user::{CreateUserRequest, UserResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all users.
///
/// # Endpoint
///
/// `GET /api/users`
///
/// Served from the `users:all` cache entry when present, so the result can
/// be up to one cache TTL old.
///
/// # Errors
///
/// Returns 500 on cache or database errors.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// ```json
/// { "name": "Ann", "email": "ann@x.com" }
/// ```
///
/// # Errors
///
/// Returns 422 if the body is malformed or fails validation.
/// Returns 500 if storage rejects the write, including a duplicate email.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .user_service
        .create_user(payload.name, payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Retrieves a single user.
///
/// # Endpoint
///
/// `GET /api/users/{user_id}`
///
/// # Errors
///
/// Returns 422 if `user_id` is not an integer.
/// Returns 404 with detail `User not found` if no user has this id.
pub async fn get_user_handler(
    user_id: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(user_id) = user_id?;

    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(user.into()))
}
