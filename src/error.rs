//! Application error type and its HTTP mapping.
//!
//! Every error body has the shape `{"detail": ...}`. Not-found errors carry a
//! human-readable string, validation errors a list of [`FieldError`], and
//! internal errors the fixed string `"Internal Server Error"`. The cause of an
//! internal error is logged, never returned to the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::infrastructure::cache::CacheError;

/// A single rejected input location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the bad input was found, e.g. `["body", "email"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed ({} errors)", .errors.len())]
    Validation { errors: Vec<FieldError> },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}: {details}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { errors } => {
                tracing::debug!("Rejected request: {} validation errors", errors.len());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": errors })),
                )
                    .into_response()
            }
            AppError::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": message }))).into_response()
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        // Constraint violations are not a client error here: storage owns
        // email uniqueness and a rejected write surfaces as a 500.
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::internal("Cache error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(convert_validation_errors(&errors, &["body"]))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "json_data",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body",
        };
        AppError::validation(vec![FieldError::new(
            &["body"],
            rejection.body_text(),
            kind,
        )])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(vec![FieldError::new(
            &["path"],
            rejection.body_text(),
            "path_parsing",
        )])
    }
}

/// Flattens validator errors into located field errors.
fn convert_validation_errors(errors: &ValidationErrors, prefix: &[&str]) -> Vec<FieldError> {
    let mut out = Vec::new();

    for (field, kind) in errors.errors() {
        let mut loc: Vec<&str> = prefix.to_vec();
        loc.push(field);

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{}'", field));
                    out.push(FieldError::new(&loc, msg, err.code.to_string()));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                out.extend(convert_validation_errors(nested, &loc));
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let index = index.to_string();
                    let mut item_loc = loc.clone();
                    item_loc.push(&index);
                    out.extend(convert_validation_errors(nested, &item_loc));
                }
            }
        }
    }

    out
}
