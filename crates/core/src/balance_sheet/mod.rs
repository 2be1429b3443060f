//! Balance sheet module.
//!
//! Turns holdings and their sparse valuation histories into a dense,
//! one-entry-per-day series of asset, liability and equity totals.
//! The engine (resolver, aggregator, generator, assembler) is pure; the
//! service wires it to the holding repository and the object store.

mod balance_sheet_model;
mod balance_sheet_service;
mod balance_sheet_traits;
mod chart;
mod holding_aggregator;
mod series_assembler;
mod series_generator;
mod valuation_resolver;

pub use balance_sheet_model::*;
pub use balance_sheet_service::BalanceSheetService;
pub use balance_sheet_traits::BalanceSheetServiceTrait;
pub use chart::downsample_series;
pub use holding_aggregator::{total_value, HoldingAggregator};
pub use series_assembler::{assemble, balance_sheet_over_time};
pub use series_generator::{BalanceSheetGenerator, SnapshotIter};
pub use valuation_resolver::{resolve_valuation_at, ValuationCursor, ValuationTimeline};
