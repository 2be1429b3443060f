use super::balance_sheet_model::{BalanceSheetSeries, ChartPoint};
use crate::errors::{Result, ValidationError};

/// Picks evenly spaced entries so a chart receives at most `max_points`.
///
/// Every `ceil(len / max_points)`-th snapshot is kept, starting with the
/// first. The series itself is left untouched.
pub fn downsample_series(series: &BalanceSheetSeries, max_points: usize) -> Result<Vec<ChartPoint>> {
    if max_points == 0 {
        return Err(ValidationError::InvalidInput(
            "maxPoints must be greater than zero".to_string(),
        )
        .into());
    }

    let interval = series.len().div_ceil(max_points).max(1);
    Ok(series
        .values()
        .step_by(interval)
        .map(ChartPoint::from)
        .collect())
}
