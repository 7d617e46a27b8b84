//! Animal repository implementation with soft delete support.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::animal::{self, ActiveModel, Entity as AnimalEntity};
use crate::config::SEX_FEMALE;
use crate::domain::{Animal, AnimalChanges, NewAnimal};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Animal repository trait for dependency injection.
///
/// Listings and tag lookups filter on the `active` flag exactly as named;
/// `find_by_id` sees every row regardless of status.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    /// Insert a new animal; the identification tag must be unique across
    /// ALL rows, retired or not
    async fn create(&self, animal: NewAnimal) -> AppResult<Animal>;

    /// Replace all mutable attributes of an existing animal
    async fn update(&self, id: i32, changes: AnimalChanges) -> AppResult<Animal>;

    /// Find animal by ID (any status)
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Animal>>;

    /// Find active animal by identification tag (retired rows are invisible)
    async fn find_by_tag(&self, tag: &str) -> AppResult<Option<Animal>>;

    /// List active animals
    async fn list_active(&self) -> AppResult<Vec<Animal>>;

    /// List retired animals
    async fn list_inactive(&self) -> AppResult<Vec<Animal>>;

    /// List animals by status: true = active, false = retired
    async fn list_by_status(&self, active: bool) -> AppResult<Vec<Animal>>;

    /// Soft delete by ID; silently does nothing if the ID does not exist
    async fn deactivate(&self, id: i32) -> AppResult<()>;

    /// Bring a retired animal back into the herd; same no-op policy
    async fn reincorporate(&self, id: i32) -> AppResult<()>;

    /// Count all animals, active and retired
    async fn count_total(&self) -> AppResult<u64>;

    /// Count active animals
    async fn count_active(&self) -> AppResult<u64>;

    /// Count active females
    async fn count_active_females(&self) -> AppResult<u64>;

    /// Average weight over the active herd (None when the herd is empty)
    async fn average_active_weight(&self) -> AppResult<Option<Decimal>>;
}

/// Concrete implementation of AnimalRepository with soft delete
pub struct AnimalStore {
    db: DatabaseConnection,
}

impl AnimalStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(FromQueryResult)]
struct WeightAverage {
    average_weight: Option<Decimal>,
}

#[async_trait]
impl AnimalRepository for AnimalStore {
    async fn create(&self, animal: NewAnimal) -> AppResult<Animal> {
        // Tag uniqueness is global: a retired animal still blocks the tag.
        // The UNIQUE constraint is the backstop; checking first gives the
        // caller a typed duplicate error instead of a driver error.
        let existing = AnimalEntity::find()
            .filter(animal::Column::TagNumber.eq(animal.tag_number.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if existing.is_some() {
            return Err(AppError::duplicate(format!("animal {}", animal.tag_number)));
        }

        let active_model = ActiveModel {
            id: NotSet,
            tag_number: Set(animal.tag_number),
            breed: Set(animal.breed),
            birth_date: Set(animal.birth_date),
            sex: Set(animal.sex.to_string()),
            weight: Set(animal.weight),
            health_status: Set(animal.health_status),
            active: Set(true),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Animal::from(model))
    }

    async fn update(&self, id: i32, changes: AnimalChanges) -> AppResult<Animal> {
        let model = AnimalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.breed = Set(changes.breed);
        active.birth_date = Set(changes.birth_date);
        active.sex = Set(changes.sex.to_string());
        active.weight = Set(changes.weight);
        active.health_status = Set(changes.health_status);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Animal::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Animal>> {
        let result = AnimalEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Animal::from))
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Option<Animal>> {
        let result = AnimalEntity::find()
            .filter(animal::Column::TagNumber.eq(tag))
            .filter(animal::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Animal::from))
    }

    async fn list_active(&self) -> AppResult<Vec<Animal>> {
        self.list_by_status(true).await
    }

    async fn list_inactive(&self) -> AppResult<Vec<Animal>> {
        self.list_by_status(false).await
    }

    async fn list_by_status(&self, active: bool) -> AppResult<Vec<Animal>> {
        let models = AnimalEntity::find()
            .filter(animal::Column::Active.eq(active))
            .order_by_asc(animal::Column::TagNumber)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Animal::from).collect())
    }

    async fn deactivate(&self, id: i32) -> AppResult<()> {
        let Some(model) = AnimalEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(());
        };

        let mut active: ActiveModel = model.into();
        active.active = Set(false);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn reincorporate(&self, id: i32) -> AppResult<()> {
        let Some(model) = AnimalEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(());
        };

        let mut active: ActiveModel = model.into();
        active.active = Set(true);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn count_total(&self) -> AppResult<u64> {
        AnimalEntity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_active(&self) -> AppResult<u64> {
        AnimalEntity::find()
            .filter(animal::Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn count_active_females(&self) -> AppResult<u64> {
        AnimalEntity::find()
            .filter(animal::Column::Active.eq(true))
            .filter(animal::Column::Sex.eq(SEX_FEMALE))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn average_active_weight(&self) -> AppResult<Option<Decimal>> {
        let row = AnimalEntity::find()
            .select_only()
            .expr_as(Func::avg(Expr::col(animal::Column::Weight)), "average_weight")
            .filter(animal::Column::Active.eq(true))
            .into_model::<WeightAverage>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.and_then(|r| r.average_weight))
    }
}
