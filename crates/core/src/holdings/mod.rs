//! Holdings module - assets and liabilities with their dated valuations.

mod holdings_errors;
mod holdings_model;
mod holdings_service;
mod holdings_traits;

pub use holdings_errors::HoldingError;
pub use holdings_model::*;
pub use holdings_service::HoldingService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};

#[cfg(test)]
mod holdings_model_tests;
