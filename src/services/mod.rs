//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
mod herd_service;
mod stats_service;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use herd_service::{BirthRecord, HerdManager, HerdService};
pub use stats_service::{HerdSummary, StatsReader, StatsService, UserSummary};
