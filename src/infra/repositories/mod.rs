//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod animal_repository;
pub(crate) mod entities;
mod event_repository;
mod user_repository;

pub use animal_repository::{AnimalRepository, AnimalStore};
pub use event_repository::{EventRepository, EventStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use animal_repository::MockAnimalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
