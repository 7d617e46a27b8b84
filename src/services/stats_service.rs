//! Statistics service - Herd and account summary figures.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Key figures over the whole registry
#[derive(Debug, Clone, Serialize)]
pub struct HerdSummary {
    /// All animals ever registered, retired included
    pub total_animals: u64,
    pub active_animals: u64,
    pub retired_animals: u64,
    pub active_females: u64,
    /// Average weight of the active herd; None when the herd is empty
    pub average_weight: Option<Decimal>,
}

/// Account counts
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub total_users: u64,
    pub active_users: u64,
}

/// Statistics service trait for dependency injection.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Compute the herd summary figures
    async fn herd_summary(&self) -> AppResult<HerdSummary>;

    /// Compute the account counts
    async fn user_summary(&self) -> AppResult<UserSummary>;
}

/// Concrete implementation of StatsService using Unit of Work.
pub struct StatsReader<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsReader<U> {
    /// Create new statistics service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsReader<U> {
    async fn herd_summary(&self) -> AppResult<HerdSummary> {
        let animals = self.uow.animals();

        let total_animals = animals.count_total().await?;
        let active_animals = animals.count_active().await?;
        let active_females = animals.count_active_females().await?;
        let average_weight = animals.average_active_weight().await?;

        Ok(HerdSummary {
            total_animals,
            active_animals,
            retired_animals: total_animals - active_animals,
            active_females,
            average_weight,
        })
    }

    async fn user_summary(&self) -> AppResult<UserSummary> {
        let users = self.uow.users();

        let total_users = users.count_total().await?;
        let active_users = users.count_active().await?;

        Ok(UserSummary {
            total_users,
            active_users,
        })
    }
}
