//! Balance sheet service implementation.

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::balance_sheet_model::{BalanceSheetSeries, BalanceSheetSummary, ChartPoint, Snapshot};
use super::balance_sheet_traits::BalanceSheetServiceTrait;
use super::chart::downsample_series;
use super::series_assembler::assemble;
use super::series_generator::BalanceSheetGenerator;
use crate::constants::{BALANCE_SHEET_KEY, BALANCE_SHEET_STORE};
use crate::errors::{DatabaseError, Result};
use crate::holdings::{HoldingRepositoryTrait, HoldingSide};
use crate::store::ObjectStoreTrait;
use crate::utils::time_utils::{bounded_days_in_range, format_date, parse_date};

/// Service computing and persisting the household balance sheet.
pub struct BalanceSheetService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    object_store: Arc<dyn ObjectStoreTrait>,
}

impl BalanceSheetService {
    /// Creates a new BalanceSheetService instance.
    pub fn new(
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        object_store: Arc<dyn ObjectStoreTrait>,
    ) -> Self {
        Self {
            holding_repository,
            object_store,
        }
    }
}

#[async_trait]
impl BalanceSheetServiceTrait for BalanceSheetService {
    fn calculate_balance_sheet(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<BalanceSheetSeries> {
        // Validate the range before touching storage.
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        bounded_days_in_range(start, end)?;

        let assets = self.holding_repository.list(Some(HoldingSide::Asset))?;
        let liabilities = self.holding_repository.list(Some(HoldingSide::Liability))?;

        debug!(
            "Calculating balance sheet from {} to {} over {} asset(s) and {} liability(ies)",
            start,
            end,
            assets.len(),
            liabilities.len()
        );

        let generator = BalanceSheetGenerator::new(&assets, &liabilities, start, end)?;
        let series = assemble(&generator);

        debug!("Balance sheet calculated: {} data points", series.len());
        Ok(series)
    }

    async fn update_balance_sheet(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<BalanceSheetSeries> {
        let series = self.calculate_balance_sheet(start_date, end_date)?;
        let document = serde_json::to_value(&series)?;
        self.object_store
            .put_object(BALANCE_SHEET_STORE, document, BALANCE_SHEET_KEY)
            .await?;
        debug!("Stored balance sheet with {} data points", series.len());
        Ok(series)
    }

    fn load_balance_sheet(&self) -> Result<Option<BalanceSheetSeries>> {
        let Some(document) = self
            .object_store
            .get_object(BALANCE_SHEET_STORE, BALANCE_SHEET_KEY)?
        else {
            return Ok(None);
        };

        match serde_json::from_value::<BalanceSheetSeries>(document) {
            Ok(series) => Ok(Some(series)),
            Err(e) => {
                warn!("Stored balance sheet could not be decoded: {}", e);
                Err(DatabaseError::Serialization(e.to_string()).into())
            }
        }
    }

    async fn clear_balance_sheet(&self) -> Result<()> {
        self.object_store
            .delete_object(BALANCE_SHEET_STORE, BALANCE_SHEET_KEY)
            .await?;
        Ok(())
    }

    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>> {
        let key = format_date(parse_date(date)?);
        let series = self.load_balance_sheet()?;
        Ok(series.and_then(|series| series.get(&key).cloned()))
    }

    fn get_chart_points(&self, max_points: usize) -> Result<Vec<ChartPoint>> {
        let series = self.load_balance_sheet()?.unwrap_or_default();
        downsample_series(&series, max_points)
    }

    fn get_summary(&self) -> Result<Option<BalanceSheetSummary>> {
        Ok(self
            .load_balance_sheet()?
            .and_then(|series| BalanceSheetSummary::from_series(&series)))
    }
}
