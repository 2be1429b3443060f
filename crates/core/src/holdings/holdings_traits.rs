use async_trait::async_trait;

use super::holdings_model::{Holding, HoldingSide, NewHolding};
use crate::errors::Result;

/// Trait for holding repository operations.
///
/// Reads are synchronous, writes go through the storage writer and are async.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    fn list(&self, side: Option<HoldingSide>) -> Result<Vec<Holding>>;
    fn get_by_id(&self, holding_id: &str) -> Result<Option<Holding>>;
    /// Fails with `HoldingError::AlreadyExists` when the id is taken on
    /// either side. The check and the write are one atomic step.
    async fn insert(&self, holding: Holding) -> Result<Holding>;
    /// Replaces the stored record. `previous_side` is the side the record is
    /// currently stored under, which differs from `holding.side` on a move.
    /// Fails with `HoldingError::NotFound` when no record is stored there.
    async fn update(&self, holding: Holding, previous_side: HoldingSide) -> Result<Holding>;
    async fn delete(&self, holding_id: &str, side: HoldingSide) -> Result<String>;
}

/// Trait for holding service operations.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    fn get_holdings(&self, side: Option<HoldingSide>) -> Result<Vec<Holding>>;
    fn get_holding(&self, holding_id: &str) -> Result<Holding>;
    async fn create_holding(&self, new_holding: NewHolding) -> Result<Holding>;
    async fn update_holding(&self, holding: Holding) -> Result<Holding>;
    async fn delete_holding(&self, holding_id: &str) -> Result<String>;
}
