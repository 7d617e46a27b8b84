//! Authentication service - User accounts and credentials.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service decides when to hash and compares credentials without leaking
//! which part of them was wrong.

use async_trait::async_trait;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use validator::Validate;

use crate::config::{MIN_PASSWORD_LENGTH, TEMP_PASSWORD_LENGTH};
use crate::domain::{NewUser, Password, RegisterUser, User, UserChanges};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user account
    async fn register(&self, registration: RegisterUser) -> AppResult<User>;

    /// Authenticate by username and password.
    ///
    /// Returns the user with a freshly stamped `last_login` on success and
    /// `None` for every failed combination, without distinguishing an
    /// unknown username from a wrong password.
    async fn login(&self, username: &str, password: &str) -> AppResult<Option<User>>;

    /// Change a user's password after verifying the current one
    async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()>;

    /// Reset the password of the active account holding this email.
    ///
    /// Stores the hash of a generated temporary password and returns the
    /// plain temporary password so it can be handed to the user.
    async fn reset_password(&self, email: &str) -> AppResult<String>;

    /// Get user by ID (any status)
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Replace a user's profile attributes
    async fn update_profile(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Deactivate an account (soft delete); no-op if the ID does not exist
    async fn deactivate_user(&self, id: i32) -> AppResult<()>;

    /// Reactivate a deactivated account; no-op if the ID does not exist
    async fn reincorporate_user(&self, id: i32) -> AppResult<()>;

    /// List active users ordered by username
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// List deactivated users ordered by username
    async fn list_retired_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn generate_temp_password() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TEMP_PASSWORD_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: RegisterUser) -> AppResult<User> {
        registration.validate()?;

        if self
            .uow
            .users()
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate(format!(
                "user {}",
                registration.username
            )));
        }
        if self
            .uow
            .users()
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate(format!("email {}", registration.email)));
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        self.uow
            .users()
            .create(NewUser {
                username: registration.username,
                password_hash,
                email: registration.email,
                first_name: registration.first_name,
                last_name: registration.last_name,
            })
            .await
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user_result = self.uow.users().find_by_username(username).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist to prevent timing attacks that could enumerate usernames.
        // The dummy hash always fails verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(password);

        if !user_exists || !password_valid {
            return Ok(None);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.unwrap();
        let stamped = self.uow.users().set_last_login(user.id, Utc::now()).await?;
        Ok(Some(stamped))
    }

    async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let stored_password = Password::from_hash(user.password_hash);
        if !stored_password.verify(current_password) {
            return Err(AppError::InvalidCredentials);
        }

        if (new_password.len() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = Password::new(new_password)?.into_string();
        self.uow.users().set_password_hash(id, password_hash).await
    }

    async fn reset_password(&self, email: &str) -> AppResult<String> {
        let user = self
            .uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)?;

        let temp_password = Self::generate_temp_password();
        let password_hash = Password::new(&temp_password)?.into_string();
        self.uow
            .users()
            .set_password_hash(user.id, password_hash)
            .await?;

        tracing::info!(user_id = user.id, "Password reset with temporary password");

        Ok(temp_password)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        changes.validate()?;
        self.uow.users().update(id, changes).await
    }

    async fn deactivate_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().deactivate(id).await
    }

    async fn reincorporate_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().reincorporate(id).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list_active().await
    }

    async fn list_retired_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list_inactive().await
    }
}
