//! Key-value object persistence contract.
//!
//! The storage crate implements this over SQLite; the core only depends on
//! the trait.

mod object_store_traits;

pub use object_store_traits::*;
