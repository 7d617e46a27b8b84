//! Herd service - Animal lifecycle and event recording.
//!
//! Orchestrates animal registration, soft-delete lifecycle and the
//! transactional birth registration use case via the Unit of Work.

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::config::{newborn_weight, FALLBACK_BREED, NEWBORN_HEALTH_STATUS};
use crate::domain::{Animal, AnimalChanges, Event, EventType, NewAnimal, NewEvent, Sex};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Outcome of a birth registration: the newborn and its birth event,
/// created in the same transaction.
#[derive(Debug, Clone, Serialize)]
pub struct BirthRecord {
    pub child: Animal,
    pub birth_event: Event,
}

/// Herd service trait for dependency injection.
///
/// By default, listings exclude retired animals; use the `retired`
/// variants to see them.
#[async_trait]
pub trait HerdService: Send + Sync {
    /// Register a new animal in the herd
    async fn register_animal(&self, animal: NewAnimal) -> AppResult<Animal>;

    /// Get animal by ID (any status)
    async fn get_animal(&self, id: i32) -> AppResult<Animal>;

    /// Get active animal by identification tag
    async fn get_by_tag(&self, tag: &str) -> AppResult<Animal>;

    /// List active animals ordered by tag
    async fn list_active_animals(&self) -> AppResult<Vec<Animal>>;

    /// List retired animals ordered by tag
    async fn list_retired_animals(&self) -> AppResult<Vec<Animal>>;

    /// Replace an animal's mutable attributes
    async fn update_animal(&self, id: i32, changes: AnimalChanges) -> AppResult<Animal>;

    /// Retire an animal (soft delete); no-op if the ID does not exist
    async fn retire_animal(&self, id: i32) -> AppResult<()>;

    /// Bring a retired animal back into the herd; no-op if the ID does not exist
    async fn reactivate_animal(&self, id: i32) -> AppResult<()>;

    /// Register a birth: create the lamb and its birth event atomically
    async fn register_birth(&self, mother_id: i32, child_tag: String) -> AppResult<BirthRecord>;

    /// Record a lifecycle event for an animal
    async fn record_event(&self, event: NewEvent) -> AppResult<Event>;

    /// List the full event history of one animal
    async fn animal_events(&self, animal_id: i32) -> AppResult<Vec<Event>>;

    /// List every recorded event
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    /// Delete an event (correction path)
    async fn delete_event(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of HerdService using Unit of Work.
pub struct HerdManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> HerdManager<U> {
    /// Create new herd service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> HerdService for HerdManager<U> {
    async fn register_animal(&self, animal: NewAnimal) -> AppResult<Animal> {
        animal.validate()?;

        // Tags are unique across the whole registry, retired animals
        // included; the repository enforces this, but checking the active
        // herd first gives the common case a clearer error.
        if self.uow.animals().find_by_tag(&animal.tag_number).await?.is_some() {
            return Err(AppError::duplicate(format!("animal {}", animal.tag_number)));
        }

        self.uow.animals().create(animal).await
    }

    async fn get_animal(&self, id: i32) -> AppResult<Animal> {
        self.uow
            .animals()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn get_by_tag(&self, tag: &str) -> AppResult<Animal> {
        self.uow
            .animals()
            .find_by_tag(tag)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_active_animals(&self) -> AppResult<Vec<Animal>> {
        self.uow.animals().list_active().await
    }

    async fn list_retired_animals(&self) -> AppResult<Vec<Animal>> {
        self.uow.animals().list_inactive().await
    }

    async fn update_animal(&self, id: i32, changes: AnimalChanges) -> AppResult<Animal> {
        changes.validate()?;
        self.uow.animals().update(id, changes).await
    }

    async fn retire_animal(&self, id: i32) -> AppResult<()> {
        self.uow.animals().deactivate(id).await
    }

    async fn reactivate_animal(&self, id: i32) -> AppResult<()> {
        self.uow.animals().reincorporate(id).await
    }

    async fn register_birth(&self, mother_id: i32, child_tag: String) -> AppResult<BirthRecord> {
        let child_tag = child_tag.trim().to_uppercase();
        if child_tag.is_empty() {
            return Err(AppError::validation("child tag number is required"));
        }

        let mother = self
            .uow
            .animals()
            .find_by_id(mother_id)
            .await?
            .ok_or_else(|| {
                AppError::business_rule(format!("mother animal {} does not exist", mother_id))
            })?;

        if !mother.active {
            return Err(AppError::business_rule(format!(
                "mother {} is retired from the herd",
                mother.tag_number
            )));
        }
        if mother.sex != Sex::Female {
            return Err(AppError::business_rule(format!(
                "animal {} is not female",
                mother.tag_number
            )));
        }
        if !mother.is_breeding_eligible() {
            return Err(AppError::business_rule(format!(
                "mother {} is below the minimum breeding weight",
                mother.tag_number
            )));
        }

        if self.uow.animals().find_by_tag(&child_tag).await?.is_some() {
            return Err(AppError::duplicate(format!("animal {}", child_tag)));
        }

        let today = Local::now().date_naive();

        let breed = if mother.breed.trim().is_empty() {
            FALLBACK_BREED.to_string()
        } else {
            mother.breed.clone()
        };

        let new_child = NewAnimal {
            tag_number: child_tag.clone(),
            breed,
            birth_date: today,
            sex: Sex::Female,
            weight: newborn_weight(),
            health_status: NEWBORN_HEALTH_STATUS.to_string(),
        };

        // Lamb and birth event are written in a single transaction; a
        // failure on either side leaves the registry untouched.
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let child = ctx.animals().create(new_child).await?;

                    let birth_event = ctx
                        .events()
                        .create(NewEvent {
                            animal_id: mother.id,
                            mother_id: Some(mother.id),
                            event_type: EventType::Birth,
                            event_date: today,
                            notes: format!("Birth of {}", child_tag),
                        })
                        .await?;

                    Ok(BirthRecord { child, birth_event })
                })
            })
            .await
    }

    async fn record_event(&self, event: NewEvent) -> AppResult<Event> {
        event.validate()?;

        if event.mother_id.is_some() && event.event_type != EventType::Birth {
            return Err(AppError::validation(
                "mother reference is only valid on birth events",
            ));
        }

        if self.uow.animals().find_by_id(event.animal_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "animal {} does not exist",
                event.animal_id
            )));
        }

        if let Some(mother_id) = event.mother_id {
            if self.uow.animals().find_by_id(mother_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "mother animal {} does not exist",
                    mother_id
                )));
            }
        }

        self.uow.events().create(event).await
    }

    async fn animal_events(&self, animal_id: i32) -> AppResult<Vec<Event>> {
        self.uow.events().list_by_animal(animal_id).await
    }

    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.uow.events().list_all().await
    }

    async fn delete_event(&self, id: i32) -> AppResult<()> {
        self.uow.events().delete_by_id(id).await
    }
}
