use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::holdings_errors::HoldingError;
use super::holdings_model::{Holding, HoldingSide, NewHolding};
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use crate::errors::Result;

/// Service managing the household's assets and liabilities.
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
}

impl HoldingService {
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn require(&self, holding_id: &str) -> Result<Holding> {
        self.repository
            .get_by_id(holding_id)?
            .ok_or_else(|| HoldingError::NotFound(holding_id.to_string()).into())
    }
}

#[async_trait]
impl HoldingServiceTrait for HoldingService {
    fn get_holdings(&self, side: Option<HoldingSide>) -> Result<Vec<Holding>> {
        let mut holdings = self.repository.list(side)?;
        holdings.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(holdings)
    }

    fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.require(holding_id)
    }

    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;

        // The repository rejects an id already taken on either side.
        let id = new_holding
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let holding = new_holding.into_holding(id);
        debug!(
            "Creating {} '{}' with {} valuation(s)",
            holding.side.as_str(),
            holding.name,
            holding.valuations.len()
        );
        self.repository.insert(holding).await
    }

    async fn update_holding(&self, holding: Holding) -> Result<Holding> {
        holding.validate()?;
        let existing = self.require(&holding.id)?;
        if existing.side != holding.side {
            debug!(
                "Moving holding {} from {} to {}",
                holding.id,
                existing.side.as_str(),
                holding.side.as_str()
            );
        }
        self.repository.update(holding, existing.side).await
    }

    async fn delete_holding(&self, holding_id: &str) -> Result<String> {
        let existing = self.require(holding_id)?;
        debug!("Deleting {} {}", existing.side.as_str(), holding_id);
        self.repository.delete(holding_id, existing.side).await
    }
}
