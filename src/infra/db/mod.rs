//! Database connection and migration management.
//!
//! Connections are always constructed explicitly from a `Config` and handed
//! to the Unit of Work; nothing in the crate holds a process-wide handle.
//! Migrations never run implicitly, the `migrate` command drives them.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, EntityTrait, QueryOrder};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::Config;
use crate::errors::AppResult;

pub mod migrations;

pub use migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection to the configured database.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.connection, None).await?;
        Ok(())
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> AppResult<()> {
        Migrator::down(&self.connection, Some(1)).await?;
        Ok(())
    }

    /// List every defined migration with its applied status.
    pub async fn migration_status(&self) -> AppResult<Vec<(String, bool)>> {
        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Drop everything and re-run all migrations.
    pub async fn fresh_migrations(&self) -> AppResult<()> {
        Migrator::fresh(&self.connection).await?;
        Ok(())
    }
}
