//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! herd concepts independent of infrastructure concerns.

pub mod animal;
pub mod event;
pub mod password;
pub mod user;

pub use animal::{Animal, AnimalChanges, NewAnimal, Sex};
pub use event::{Event, EventType, NewEvent};
pub use password::Password;
pub use user::{NewUser, RegisterUser, User, UserChanges};
