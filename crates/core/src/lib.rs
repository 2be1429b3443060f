//! DealView Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for DealView: holdings with their
//! valuation histories and the balance sheet engine that turns them into a
//! daily net-worth series. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod balance_sheet;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod store;
pub mod utils;

// Re-export common types from holdings and balance sheet modules
pub use balance_sheet::*;
pub use holdings::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
