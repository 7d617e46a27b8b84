//! Event repository implementation.
//!
//! Events have no soft-delete flag: the history of an animal is kept as-is,
//! with a hard `delete_by_id` as the only correction path.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::event::{self, ActiveModel, Entity as EventEntity};
use crate::domain::{Event, NewEvent};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event; the subject animal reference is mandatory and
    /// enforced by the foreign key
    async fn create(&self, event: NewEvent) -> AppResult<Event>;

    /// List every recorded event
    async fn list_all(&self) -> AppResult<Vec<Event>>;

    /// List the events of one animal, in insertion order
    async fn list_by_animal(&self, animal_id: i32) -> AppResult<Vec<Event>>;

    /// Hard delete an event (correction path, not part of normal lifecycle)
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn create(&self, event: NewEvent) -> AppResult<Event> {
        let active_model = ActiveModel {
            id: NotSet,
            animal_id: Set(event.animal_id),
            mother_id: Set(event.mother_id),
            event_type: Set(event.event_type.to_string()),
            event_date: Set(event.event_date),
            notes: Set(event.notes),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(Event::from(model))
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        let models = EventEntity::find()
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Event::from).collect())
    }

    async fn list_by_animal(&self, animal_id: i32) -> AppResult<Vec<Event>> {
        let models = EventEntity::find()
            .filter(event::Column::AnimalId.eq(animal_id))
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Event::from).collect())
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = EventEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
