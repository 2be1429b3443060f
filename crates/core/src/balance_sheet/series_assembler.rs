//! Collecting snapshots into a date-keyed series.

use super::balance_sheet_model::{BalanceSheetSeries, Snapshot};
use super::series_generator::BalanceSheetGenerator;
use crate::errors::Result;
use crate::holdings::HoldingMap;
use crate::utils::time_utils::parse_date;

/// Keys every snapshot by its canonical date. A repeated date keeps the
/// later snapshot.
pub fn assemble<I>(snapshots: I) -> BalanceSheetSeries
where
    I: IntoIterator<Item = Snapshot>,
{
    snapshots.into_iter().collect()
}

/// Computes the balance sheet for every day of `[start_date, end_date]`.
///
/// Both bounds must be canonical `YYYY-MM-DD` strings; a malformed bound, an
/// over-long range or amounts that could overflow a total are rejected before
/// any snapshot is produced. A start after the end yields an empty series.
pub fn balance_sheet_over_time(
    assets: &HoldingMap,
    liabilities: &HoldingMap,
    start_date: &str,
    end_date: &str,
) -> Result<BalanceSheetSeries> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let generator =
        BalanceSheetGenerator::new(assets.values(), liabilities.values(), start, end)?;
    Ok(assemble(&generator))
}
