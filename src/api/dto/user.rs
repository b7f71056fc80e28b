//! DTOs for the user endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::User;

/// Request to create a user.
///
/// Both fields are free-form strings: an empty name or an address without
/// an `@` is stored as given. Only missing fields and non-string values are
/// rejected, during deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name":"Ann","email":"ann@x.com"}"#).unwrap();

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = serde_json::from_str::<CreateUserRequest>(r#"{"name":"Ann"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result =
            serde_json::from_str::<CreateUserRequest>(r#"{"name":42,"email":"ann@x.com"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_name_accepted() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name":"","email":"ann@x.com"}"#).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.name, "");
    }

    #[test]
    fn test_free_form_email_accepted() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"name":"Ann","email":"ann"}"#).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.email, "ann");
    }

    #[test]
    fn test_response_field_order() {
        let body = serde_json::to_string(&UserResponse::from(User::new(
            1,
            "Ann".to_string(),
            "ann@x.com".to_string(),
        )))
        .unwrap();

        assert_eq!(body, r#"{"id":1,"name":"Ann","email":"ann@x.com"}"#);
    }
}
