//! Day-by-day snapshot generation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::iter::FusedIterator;

use super::balance_sheet_model::Snapshot;
use super::holding_aggregator::HoldingAggregator;
use super::valuation_resolver::ValuationTimeline;
use crate::errors::{Result, ValidationError};
use crate::holdings::Holding;
use crate::utils::time_utils::{bounded_days_in_range, days_in_range};

/// Prepared inputs for one balance sheet computation.
///
/// Each holding's valuations are sorted once on construction. [`Self::iter`]
/// can be called any number of times; every call starts a fresh pass from
/// the first day.
#[derive(Debug, Clone)]
pub struct BalanceSheetGenerator {
    assets: Vec<ValuationTimeline>,
    liabilities: Vec<ValuationTimeline>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl BalanceSheetGenerator {
    /// Fails with a validation error, before any snapshot exists, when the
    /// range is longer than the allowed span or when the holdings' amounts
    /// could overflow a daily total or its equity.
    pub fn new<'a, A, L>(
        assets: A,
        liabilities: L,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self>
    where
        A: IntoIterator<Item = &'a Holding>,
        L: IntoIterator<Item = &'a Holding>,
    {
        bounded_days_in_range(start_date, end_date)?;

        let generator = Self {
            assets: assets.into_iter().map(ValuationTimeline::for_holding).collect(),
            liabilities: liabilities
                .into_iter()
                .map(ValuationTimeline::for_holding)
                .collect(),
            start_date,
            end_date,
        };
        generator.check_totals_fit()?;
        Ok(generator)
    }

    /// Every daily total on either side is bounded by the sum of the peaks of
    /// its timelines, and `|assets - liabilities|` by the sum over both sides.
    /// If that grand sum fits in a `Decimal`, no snapshot can overflow.
    fn check_totals_fit(&self) -> Result<()> {
        self.assets
            .iter()
            .chain(&self.liabilities)
            .try_fold(Decimal::ZERO, |bound, timeline| {
                bound.checked_add(timeline.peak())
            })
            .map(|_| ())
            .ok_or_else(|| {
                ValidationError::InvalidInput(
                    "Holding amounts are too large to total without overflow".to_string(),
                )
                .into()
            })
    }

    /// Number of snapshots a pass produces.
    pub fn len(&self) -> usize {
        days_in_range(self.start_date, self.end_date)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> SnapshotIter<'_> {
        SnapshotIter {
            assets: HoldingAggregator::new(&self.assets),
            liabilities: HoldingAggregator::new(&self.liabilities),
            next_date: Some(self.start_date),
            end_date: self.end_date,
            remaining: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a BalanceSheetGenerator {
    type Item = Snapshot;
    type IntoIter = SnapshotIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazily yields one [`Snapshot`] per calendar day, ascending.
#[derive(Debug, Clone)]
pub struct SnapshotIter<'a> {
    assets: HoldingAggregator<'a>,
    liabilities: HoldingAggregator<'a>,
    next_date: Option<NaiveDate>,
    end_date: NaiveDate,
    remaining: usize,
}

impl Iterator for SnapshotIter<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let date = self.next_date.filter(|date| *date <= self.end_date)?;

        // Totals are bounded by `BalanceSheetGenerator::new`, so neither side
        // overflows; stop the pass rather than panic if that ever breaks.
        let (Some(total_assets), Some(total_liabilities)) =
            (self.assets.total_at(date), self.liabilities.total_at(date))
        else {
            self.next_date = None;
            self.remaining = 0;
            return None;
        };

        // succ_opt is None only at NaiveDate::MAX, which ends the pass.
        self.next_date = date.succ_opt();
        self.remaining = self.remaining.saturating_sub(1);

        Some(Snapshot::new(date, total_assets, total_liabilities))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SnapshotIter<'_> {}

impl FusedIterator for SnapshotIter<'_> {}
