//! User entity stored in the `users` table.

use serde::{Deserialize, Serialize};

/// A persisted user record.
///
/// The identifier is assigned by storage. Email uniqueness is enforced by the
/// `users_email_key` unique index, not by the application.
///
/// This type also defines the schema of the cached user list: the blob under
/// the `users:all` key is a JSON array of `User` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}
