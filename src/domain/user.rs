//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Stamped on every successful login (None until the first one)
    pub last_login: Option<DateTime<Utc>>,
    pub active: bool,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Display name for the UI layer
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Registration data as entered by the user (plain password)
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 50, message = "username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
}

/// Persisted form of a new user: the password is already hashed.
///
/// The repository stores this hash as given and never hashes itself; hashing
/// is the authentication service's responsibility.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Replacement of a user's mutable profile attributes
#[derive(Debug, Clone, Validate, Deserialize)]
pub struct UserChanges {
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[validate(length(max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
}
