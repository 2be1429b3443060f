//! SQLite storage implementation for DealView.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `dealview-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - The key-value object store and the holding repository built on it
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod holdings;
pub mod objects;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use holdings::HoldingRepository;
pub use objects::ObjectStoreRepository;

// Re-export from dealview-core for convenience
pub use dealview_core::errors::{DatabaseError, Error, Result};
