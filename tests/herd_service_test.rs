//! Herd service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use mockall::predicate::eq;
use rust_decimal::Decimal;

use herdbook::domain::{Animal, Event, EventType, NewAnimal, NewEvent, Sex};
use herdbook::errors::{AppError, AppResult};
use herdbook::infra::{
    AnimalRepository, EventRepository, MockAnimalRepository, MockEventRepository,
    MockUserRepository, TransactionContext, UnitOfWork, UserRepository,
};
use herdbook::services::{HerdManager, HerdService};

fn test_ewe(id: i32, tag: &str, weight: Decimal) -> Animal {
    Animal {
        id,
        tag_number: tag.to_string(),
        breed: "Merino".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        sex: Sex::Female,
        weight,
        health_status: "Healthy".to_string(),
        active: true,
    }
}

fn test_new_animal(tag: &str) -> NewAnimal {
    NewAnimal {
        tag_number: tag.to_string(),
        breed: "Merino".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        sex: Sex::Female,
        weight: Decimal::new(4500, 2),
        health_status: "Healthy".to_string(),
    }
}

/// Test mock for UnitOfWork that wraps mockall repositories
struct TestUnitOfWork {
    animal_repo: Arc<MockAnimalRepository>,
    event_repo: Arc<MockEventRepository>,
    user_repo: Arc<MockUserRepository>,
}

impl TestUnitOfWork {
    fn new(animal_repo: MockAnimalRepository, event_repo: MockEventRepository) -> Self {
        Self {
            animal_repo: Arc::new(animal_repo),
            event_repo: Arc::new(event_repo),
            user_repo: Arc::new(MockUserRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animal_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn service(
    animal_repo: MockAnimalRepository,
    event_repo: MockEventRepository,
) -> HerdManager<TestUnitOfWork> {
    HerdManager::new(Arc::new(TestUnitOfWork::new(animal_repo, event_repo)))
}

#[tokio::test]
async fn test_register_animal_success() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_tag().returning(|_| Ok(None));
    animals
        .expect_create()
        .returning(|a| Ok(test_ewe(1, &a.tag_number, a.weight)));

    let result = service(animals, MockEventRepository::new())
        .register_animal(test_new_animal("OVE001"))
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().tag_number, "OVE001");
}

#[tokio::test]
async fn test_register_animal_duplicate_tag() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_find_by_tag()
        .returning(|tag| Ok(Some(test_ewe(1, tag, Decimal::new(4000, 2)))));

    let result = service(animals, MockEventRepository::new())
        .register_animal(test_new_animal("OVE001"))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn test_register_animal_rejects_invalid_weight() {
    let mut invalid = test_new_animal("OVE001");
    invalid.weight = Decimal::ZERO;

    let result = service(MockAnimalRepository::new(), MockEventRepository::new())
        .register_animal(invalid)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_get_animal_not_found() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_id().returning(|_| Ok(None));

    let result = service(animals, MockEventRepository::new())
        .get_animal(42)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_retire_animal_passes_through() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_deactivate()
        .with(eq(7))
        .returning(|_| Ok(()));

    let result = service(animals, MockEventRepository::new())
        .retire_animal(7)
        .await;

    assert!(result.is_ok());
}

// =============================================================================
// Birth registration preconditions
// =============================================================================

#[tokio::test]
async fn test_register_birth_rejects_blank_child_tag() {
    let result = service(MockAnimalRepository::new(), MockEventRepository::new())
        .register_birth(1, "   ".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_register_birth_unknown_mother() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_id().returning(|_| Ok(None));

    let result = service(animals, MockEventRepository::new())
        .register_birth(99, "OVE010".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BusinessRule(_)));
}

#[tokio::test]
async fn test_register_birth_retired_mother() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_id().returning(|id| {
        let mut mother = test_ewe(id, "OVE001", Decimal::new(4000, 2));
        mother.active = false;
        Ok(Some(mother))
    });

    let result = service(animals, MockEventRepository::new())
        .register_birth(1, "OVE010".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BusinessRule(_)));
}

#[tokio::test]
async fn test_register_birth_male_mother() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_id().returning(|id| {
        let mut ram = test_ewe(id, "OVE001", Decimal::new(4000, 2));
        ram.sex = Sex::Male;
        Ok(Some(ram))
    });

    let result = service(animals, MockEventRepository::new())
        .register_birth(1, "OVE010".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BusinessRule(_)));
}

#[tokio::test]
async fn test_register_birth_underweight_mother() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_ewe(id, "OVE001", Decimal::new(2999, 2)))));

    let result = service(animals, MockEventRepository::new())
        .register_birth(1, "OVE010".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BusinessRule(_)));
}

#[tokio::test]
async fn test_register_birth_duplicate_child_tag() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_ewe(id, "OVE001", Decimal::new(4000, 2)))));
    animals
        .expect_find_by_tag()
        .returning(|tag| Ok(Some(test_ewe(2, tag, Decimal::new(4000, 2)))));

    let result = service(animals, MockEventRepository::new())
        .register_birth(1, "OVE010".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn test_register_birth_normalizes_child_tag() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_ewe(id, "OVE001", Decimal::new(3000, 2)))));
    // The lookup must see the trimmed, uppercased tag
    animals
        .expect_find_by_tag()
        .withf(|tag| tag == "OVE010")
        .returning(|_| Ok(None));

    // A mother at exactly the threshold weight passes every precondition;
    // the mock refuses the transaction itself, so reaching that refusal
    // proves the checks all passed.
    let result = service(animals, MockEventRepository::new())
        .register_birth(1, "  ove010 ".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
}

// =============================================================================
// Event recording
// =============================================================================

#[tokio::test]
async fn test_record_event_success() {
    let mut animals = MockAnimalRepository::new();
    animals
        .expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(test_ewe(id, "OVE001", Decimal::new(4000, 2)))));

    let mut events = MockEventRepository::new();
    events.expect_create().returning(|e| {
        Ok(Event {
            id: 1,
            animal_id: e.animal_id,
            mother_id: e.mother_id,
            event_type: e.event_type,
            event_date: e.event_date,
            notes: e.notes,
        })
    });

    let result = service(animals, events)
        .record_event(NewEvent {
            animal_id: 1,
            mother_id: None,
            event_type: EventType::Vaccination,
            event_date: Local::now().date_naive(),
            notes: "Annual clostridial booster".to_string(),
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().event_type, EventType::Vaccination);
}

#[tokio::test]
async fn test_record_event_unknown_animal() {
    let mut animals = MockAnimalRepository::new();
    animals.expect_find_by_id().returning(|_| Ok(None));

    let result = service(animals, MockEventRepository::new())
        .record_event(NewEvent {
            animal_id: 99,
            mother_id: None,
            event_type: EventType::Treatment,
            event_date: Local::now().date_naive(),
            notes: String::new(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_record_event_rejects_mother_on_non_birth() {
    let result = service(MockAnimalRepository::new(), MockEventRepository::new())
        .record_event(NewEvent {
            animal_id: 1,
            mother_id: Some(2),
            event_type: EventType::Deworming,
            event_date: Local::now().date_naive(),
            notes: String::new(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_delete_event_not_found() {
    let mut events = MockEventRepository::new();
    events
        .expect_delete_by_id()
        .returning(|_| Err(AppError::NotFound));

    let result = service(MockAnimalRepository::new(), events)
        .delete_event(42)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
