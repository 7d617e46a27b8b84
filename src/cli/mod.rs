//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `stats` - Herd and account summary figures

pub mod args;

pub use args::{Cli, Commands};
