//! Resolving a holding's value as of a date.
//!
//! Two paths give identical answers:
//! - [`resolve_valuation_at`] scans every valuation on each call;
//! - [`ValuationTimeline`] sorts the dated valuations once and hands out
//!   [`ValuationCursor`]s that only move forward as the day loop advances.
//!
//! Among valuations sharing a date, the one listed last in the holding wins.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::holdings::{Holding, Valuation};

/// Amount of the valuation with the greatest date on or before `date`,
/// zero when none qualifies. Undated valuations never qualify.
pub fn resolve_valuation_at(holding: &Holding, date: NaiveDate) -> Decimal {
    let mut selected: Option<(NaiveDate, Decimal)> = None;
    for valuation in &holding.valuations {
        let Some(valuation_date) = valuation.date else {
            continue;
        };
        if valuation_date > date {
            continue;
        }
        match selected {
            Some((best, _)) if valuation_date < best => {}
            _ => selected = Some((valuation_date, valuation.amount)),
        }
    }
    selected.map(|(_, amount)| amount).unwrap_or(Decimal::ZERO)
}

/// A holding's dated valuations, sorted by date once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuationTimeline {
    points: Vec<(NaiveDate, Decimal)>,
}

impl ValuationTimeline {
    pub fn from_valuations(valuations: &[Valuation]) -> Self {
        let mut points: Vec<(NaiveDate, Decimal)> = valuations
            .iter()
            .filter_map(|v| v.date.map(|date| (date, v.amount)))
            .collect();
        // Stable: equal dates keep their listed order.
        points.sort_by_key(|(date, _)| *date);
        Self { points }
    }

    pub fn for_holding(holding: &Holding) -> Self {
        Self::from_valuations(&holding.valuations)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest absolute amount on the timeline; no resolved value exceeds it.
    pub fn peak(&self) -> Decimal {
        self.points
            .iter()
            .map(|(_, amount)| amount.abs())
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn cursor(&self) -> ValuationCursor<'_> {
        ValuationCursor {
            points: &self.points,
            position: 0,
            current: Decimal::ZERO,
            last_date: None,
        }
    }
}

/// Forward-only position in a [`ValuationTimeline`].
///
/// Querying non-decreasing dates costs amortized O(1) per call. Asking for a
/// date earlier than the previous one rewinds to the start.
#[derive(Debug, Clone)]
pub struct ValuationCursor<'a> {
    points: &'a [(NaiveDate, Decimal)],
    position: usize,
    current: Decimal,
    last_date: Option<NaiveDate>,
}

impl ValuationCursor<'_> {
    pub fn value_at(&mut self, date: NaiveDate) -> Decimal {
        if self.last_date.is_some_and(|last| date < last) {
            self.position = 0;
            self.current = Decimal::ZERO;
        }
        self.last_date = Some(date);

        while let Some(&(valuation_date, amount)) = self.points.get(self.position) {
            if valuation_date > date {
                break;
            }
            self.current = amount;
            self.position += 1;
        }
        self.current
    }
}
