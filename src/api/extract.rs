//! Request extractors that reject bad input with the API error shape.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::{HeaderValue, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that validates the deserialized value.
///
/// Malformed JSON, missing fields, wrong types and failed `validator` rules
/// are all rejected with 422 and a `{"detail": [...]}` body before the
/// handler runs. A body sent without a `Content-Type` header is parsed as
/// JSON; any other non-JSON content type is rejected.
///
/// ```ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
