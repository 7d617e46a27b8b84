//! Herdbook - Livestock registry data layer
//!
//! Transactional data layer for a small livestock operation: the herd
//! itself, the veterinary and lifecycle events of each animal, and the
//! user accounts of the people keeping the records.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Print summary figures
//! cargo run -- stats
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Animal, Event, Password, User};
pub use errors::{AppError, AppResult};
