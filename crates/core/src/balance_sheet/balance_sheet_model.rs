//! Balance sheet domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::time_utils::format_date;

/// Computed totals for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,
    pub total_asset_value: Decimal,
    /// Positive magnitude.
    pub total_liability_value: Decimal,
    /// Always `total_asset_value - total_liability_value`.
    pub equity: Decimal,
}

impl Snapshot {
    pub fn new(date: NaiveDate, total_asset_value: Decimal, total_liability_value: Decimal) -> Self {
        Self {
            date,
            total_asset_value,
            total_liability_value,
            equity: total_asset_value - total_liability_value,
        }
    }
}

/// Snapshots keyed by canonical `YYYY-MM-DD` date string.
///
/// Backed by an ordered map, so iteration is ascending by date. Inserting a
/// second snapshot for the same date replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheetSeries(BTreeMap<String, Snapshot>);

impl BalanceSheetSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot under its date key, returning the one it replaced.
    pub fn insert(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        self.0.insert(format_date(snapshot.date), snapshot)
    }

    pub fn get(&self, date_key: &str) -> Option<&Snapshot> {
        self.0.get(date_key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Snapshot> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Snapshot)> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.0.values().next()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.0.values().next_back()
    }
}

impl FromIterator<Snapshot> for BalanceSheetSeries {
    fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
        let mut series = Self::new();
        for snapshot in iter {
            series.insert(snapshot);
        }
        series
    }
}

/// Inclusive date range as received from callers, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRange {
    pub start_date: String,
    pub end_date: String,
}

/// One point handed to a chart after down-sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub equity: Decimal,
}

impl From<&Snapshot> for ChartPoint {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            date: snapshot.date,
            assets: snapshot.total_asset_value,
            liabilities: snapshot.total_liability_value,
            equity: snapshot.equity,
        }
    }
}

/// Headline figures of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: usize,
    pub latest_equity: Decimal,
    pub highest_equity: Decimal,
    pub lowest_equity: Decimal,
}

impl BalanceSheetSummary {
    /// `None` for an empty series.
    pub fn from_series(series: &BalanceSheetSeries) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;
        let highest_equity = series.values().map(|s| s.equity).max()?;
        let lowest_equity = series.values().map(|s| s.equity).min()?;

        Some(Self {
            start_date: first.date,
            end_date: last.date,
            days: series.len(),
            latest_equity: last.equity,
            highest_equity,
            lowest_equity,
        })
    }
}
