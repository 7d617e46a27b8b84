//! Stats command - Print registry summary figures.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{StatsReader, StatsService};

/// Execute the stats command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    let uow = Arc::new(Persistence::new(db.get_connection()));
    let stats = StatsReader::new(uow);

    let herd = stats.herd_summary().await?;
    let users = stats.user_summary().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "herd": herd,
            "users": users,
        }))
        .map_err(|e| AppError::internal(e.to_string()))?
    );

    Ok(())
}
