//! User repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Username and email lookups only see active accounts; `find_by_id` sees
/// every row. The repository persists the password hash it is given and
/// never hashes anything itself.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; username and email must be unique across ALL
    /// rows, deactivated accounts included
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace a user's mutable profile attributes
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Stamp the last successful login and return the updated user
    async fn set_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<User>;

    /// Replace the stored password hash
    async fn set_password_hash(&self, id: i32, password_hash: String) -> AppResult<()>;

    /// Find active user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find active user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID (any status)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Soft delete by ID; silently does nothing if the ID does not exist
    async fn deactivate(&self, id: i32) -> AppResult<()>;

    /// Reactivate a deactivated account; same no-op policy
    async fn reincorporate(&self, id: i32) -> AppResult<()>;

    /// Count all users, active and deactivated
    async fn count_total(&self) -> AppResult<u64>;

    /// Count active users
    async fn count_active(&self) -> AppResult<u64>;

    /// List active users
    async fn list_active(&self) -> AppResult<Vec<User>>;

    /// List deactivated users
    async fn list_inactive(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        // Username and email are unique across all rows, deactivated
        // accounts included. The UNIQUE constraints are the backstop; the
        // pre-checks turn the common case into a typed duplicate error.
        let username_taken = UserEntity::find()
            .filter(user::Column::Username.eq(user.username.as_str()))
            .one(&self.db)
            .await?
            .is_some();
        if username_taken {
            return Err(AppError::duplicate(format!("user {}", user.username)));
        }

        let email_taken = UserEntity::find()
            .filter(user::Column::Email.eq(user.email.as_str()))
            .one(&self.db)
            .await?
            .is_some();
        if email_taken {
            return Err(AppError::duplicate(format!("email {}", user.email)));
        }

        let active_model = ActiveModel {
            id: NotSet,
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            last_login: Set(None),
            active: Set(true),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        // A changed email must not collide with any other account
        let email_taken = UserEntity::find()
            .filter(user::Column::Email.eq(changes.email.as_str()))
            .filter(user::Column::Id.ne(id))
            .one(&self.db)
            .await?
            .is_some();
        if email_taken {
            return Err(AppError::duplicate(format!("email {}", changes.email)));
        }

        let mut active: ActiveModel = model.into();
        active.email = Set(changes.email);
        active.first_name = Set(changes.first_name);
        active.last_name = Set(changes.last_name);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.last_login = Set(Some(at));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn set_password_hash(&self, id: i32, password_hash: String) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.password_hash = Set(password_hash);

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn deactivate(&self, id: i32) -> AppResult<()> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(());
        };

        let mut active: ActiveModel = model.into();
        active.active = Set(false);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn reincorporate(&self, id: i32) -> AppResult<()> {
        let Some(model) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(());
        };

        let mut active: ActiveModel = model.into();
        active.active = Set(true);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn count_total(&self) -> AppResult<u64> {
        UserEntity::find().count(&self.db).await.map_err(Into::into)
    }

    async fn count_active(&self) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn list_active(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Active.eq(true))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn list_inactive(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(user::Column::Active.eq(false))
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
