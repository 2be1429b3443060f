//! Summing resolved values across one side of the balance sheet.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::valuation_resolver::{resolve_valuation_at, ValuationCursor, ValuationTimeline};
use crate::holdings::Holding;

/// Sum of every holding's value as of `date`, using the full-scan resolver.
/// Decimal addition is exact, so the order of holdings does not matter.
/// `None` when the sum overflows.
pub fn total_value<'a, I>(holdings: I, date: NaiveDate) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Holding>,
{
    holdings
        .into_iter()
        .try_fold(Decimal::ZERO, |total, holding| {
            total.checked_add(resolve_valuation_at(holding, date))
        })
}

/// Cursor-backed running total for one side, advanced day by day.
#[derive(Debug, Clone)]
pub struct HoldingAggregator<'a> {
    cursors: Vec<ValuationCursor<'a>>,
}

impl<'a> HoldingAggregator<'a> {
    pub fn new(timelines: &'a [ValuationTimeline]) -> Self {
        Self {
            cursors: timelines.iter().map(ValuationTimeline::cursor).collect(),
        }
    }

    /// `None` when the sum overflows.
    pub fn total_at(&mut self, date: NaiveDate) -> Option<Decimal> {
        self.cursors
            .iter_mut()
            .try_fold(Decimal::ZERO, |total, cursor| {
                total.checked_add(cursor.value_at(date))
            })
    }
}
