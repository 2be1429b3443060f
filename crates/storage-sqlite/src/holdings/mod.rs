//! SQLite storage implementation for holdings.

mod repository;

pub use repository::HoldingRepository;

// Re-export trait from core for convenience
pub use dealview_core::holdings::HoldingRepositoryTrait;
