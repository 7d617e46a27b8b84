//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages the transaction lifecycle so
//! that multi-record operations (birth registration) commit or roll back as
//! one. Each mutating service call opens at most one transaction scoped to
//! that call; nothing holds a transaction across calls.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{animal, event};
use super::repositories::{
    AnimalRepository, AnimalStore, EventRepository, EventStore, UserRepository, UserStore,
};
use crate::domain::{Animal, Event, NewAnimal, NewEvent};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic `transaction` method is not mockable; tests mock
/// at the repository level instead (see the service tests).
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get animal repository
    fn animals(&self) -> Arc<dyn AnimalRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;

    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed when the closure returns `Ok` and rolled
    /// back when it returns `Err`; partial writes are never visible.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part of the
/// same database transaction; the context borrows the transaction so it
/// cannot outlive it.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get animal repository for this transaction
    pub fn animals(&self) -> TxAnimalRepository<'_> {
        TxAnimalRepository::new(self.txn)
    }

    /// Get event repository for this transaction
    pub fn events(&self) -> TxEventRepository<'_> {
        TxEventRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork.
///
/// Built around an explicitly injected connection; there is no process-wide
/// connection singleton anywhere in the crate.
pub struct Persistence {
    db: DatabaseConnection,
    animal_repo: Arc<AnimalStore>,
    event_repo: Arc<EventStore>,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let animal_repo = Arc::new(AnimalStore::new(db.clone()));
        let event_repo = Arc::new(EventStore::new(db.clone()));
        let user_repo = Arc::new(UserStore::new(db.clone()));
        Self {
            db,
            animal_repo,
            event_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animal_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware animal repository.
///
/// Covers the subset of operations the birth transaction needs; everything
/// else goes through the non-transactional repository.
pub struct TxAnimalRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAnimalRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new animal within the transaction
    pub async fn create(&self, new_animal: NewAnimal) -> AppResult<Animal> {
        let existing = animal::Entity::find()
            .filter(animal::Column::TagNumber.eq(new_animal.tag_number.as_str()))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        if existing.is_some() {
            return Err(AppError::duplicate(format!(
                "animal {}",
                new_animal.tag_number
            )));
        }

        let active_model = animal::ActiveModel {
            id: NotSet,
            tag_number: Set(new_animal.tag_number),
            breed: Set(new_animal.breed),
            birth_date: Set(new_animal.birth_date),
            sex: Set(new_animal.sex.to_string()),
            weight: Set(new_animal.weight),
            health_status: Set(new_animal.health_status),
            active: Set(true),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(Animal::from(model))
    }
}

/// Transaction-aware event repository.
pub struct TxEventRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEventRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new event within the transaction
    pub async fn create(&self, new_event: NewEvent) -> AppResult<Event> {
        let active_model = event::ActiveModel {
            id: NotSet,
            animal_id: Set(new_event.animal_id),
            mother_id: Set(new_event.mother_id),
            event_type: Set(new_event.event_type.to_string()),
            event_date: Set(new_event.event_date),
            notes: Set(new_event.notes),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(Event::from(model))
    }
}
