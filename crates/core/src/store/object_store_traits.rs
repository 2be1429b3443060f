use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::Result;

/// A set of named stores, each mapping string keys to JSON documents.
///
/// Failures are reported as [`crate::Error::Database`]; callers propagate
/// them untouched.
#[async_trait]
pub trait ObjectStoreTrait: Send + Sync {
    /// Returns the document stored under `key`, or `None` when absent.
    fn get_object(&self, store: &str, key: &str) -> Result<Option<Value>>;

    /// Inserts or replaces the document under `key` and returns the key.
    async fn put_object(&self, store: &str, value: Value, key: &str) -> Result<String>;

    /// Removes the document under `key` and returns the key. Removing a
    /// missing key succeeds.
    async fn delete_object(&self, store: &str, key: &str) -> Result<String>;

    /// Every document of a store, keyed by its key.
    fn get_all_objects(&self, store: &str) -> Result<BTreeMap<String, Value>>;
}
