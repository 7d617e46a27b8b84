//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.run_migrations().await?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last migration");
            db.rollback_migration().await?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running every migration");
            db.fresh_migrations().await?;
            tracing::info!("Fresh schema ready");
        }
    }

    Ok(())
}
