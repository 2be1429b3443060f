//! Balance sheet service traits.

use async_trait::async_trait;

use super::balance_sheet_model::{BalanceSheetSeries, BalanceSheetSummary, ChartPoint, Snapshot};
use crate::errors::Result;

/// Trait defining the contract for balance sheet operations.
#[async_trait]
pub trait BalanceSheetServiceTrait: Send + Sync {
    /// Computes the series for `[start_date, end_date]` from the current
    /// holdings without storing it.
    ///
    /// # Arguments
    /// * `start_date` - First day, `YYYY-MM-DD`
    /// * `end_date` - Last day (inclusive), `YYYY-MM-DD`
    ///
    /// # Returns
    /// One snapshot per day; empty when `start_date` is after `end_date`.
    /// A malformed bound yields a validation error.
    fn calculate_balance_sheet(&self, start_date: &str, end_date: &str)
        -> Result<BalanceSheetSeries>;

    /// Computes the series and stores it under the installation's single
    /// balance sheet key, replacing any previous one.
    async fn update_balance_sheet(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<BalanceSheetSeries>;

    /// The stored series, if one has been computed.
    fn load_balance_sheet(&self) -> Result<Option<BalanceSheetSeries>>;

    /// Removes the stored series.
    async fn clear_balance_sheet(&self) -> Result<()>;

    /// The stored snapshot for one date.
    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>>;

    /// The stored series down-sampled to at most `max_points` entries.
    fn get_chart_points(&self, max_points: usize) -> Result<Vec<ChartPoint>>;

    /// Headline figures of the stored series.
    fn get_summary(&self) -> Result<Option<BalanceSheetSummary>>;
}
