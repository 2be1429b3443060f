//! SQLite storage implementation for the key-value object store.

mod model;
mod repository;

pub use model::ObjectRecordDB;
pub use repository::{
    delete_record, insert_record, load_record, load_store, put_record, ObjectStoreRepository,
};

// Re-export trait from core for convenience
pub use dealview_core::store::ObjectStoreTrait;
