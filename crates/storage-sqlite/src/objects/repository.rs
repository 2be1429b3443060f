use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::model::ObjectRecordDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::object_store::dsl::*;
use dealview_core::errors::{Result, ValidationError};
use dealview_core::store::ObjectStoreTrait;

/// Reads one document, decoding its JSON text.
pub fn load_record(conn: &mut SqliteConnection, store: &str, key: &str) -> Result<Option<Value>> {
    let raw = object_store
        .filter(store_name.eq(store))
        .filter(object_key.eq(key))
        .select(object_value)
        .first::<String>(conn)
        .optional()
        .into_core()?;

    match raw {
        Some(text) => Ok(Some(serde_json::from_str(&text).map_err(StorageError::from)?)),
        None => Ok(None),
    }
}

/// Reads every document of a store, ordered by key.
pub fn load_store(conn: &mut SqliteConnection, store: &str) -> Result<BTreeMap<String, Value>> {
    let rows = object_store
        .filter(store_name.eq(store))
        .order(object_key.asc())
        .select(ObjectRecordDB::as_select())
        .load::<ObjectRecordDB>(conn)
        .into_core()?;

    rows.into_iter()
        .map(|row| -> Result<(String, Value)> {
            let value: Value = serde_json::from_str(&row.object_value).map_err(StorageError::from)?;
            Ok((row.object_key, value))
        })
        .collect()
}

/// Inserts or replaces one document.
pub fn put_record(conn: &mut SqliteConnection, store: &str, key: &str, value: &Value) -> Result<()> {
    let text = serde_json::to_string(value).map_err(StorageError::from)?;
    diesel::replace_into(object_store)
        .values(&ObjectRecordDB::new(store, key, text))
        .execute(conn)
        .into_core()?;
    Ok(())
}

/// Inserts one document. Fails on a key already present in the store.
pub fn insert_record(
    conn: &mut SqliteConnection,
    store: &str,
    key: &str,
    value: &Value,
) -> Result<()> {
    let text = serde_json::to_string(value).map_err(StorageError::from)?;
    diesel::insert_into(object_store)
        .values(&ObjectRecordDB::new(store, key, text))
        .execute(conn)
        .into_core()?;
    Ok(())
}

/// Removes one document. Returns whether a row was deleted.
pub fn delete_record(conn: &mut SqliteConnection, store: &str, key: &str) -> Result<bool> {
    let affected = diesel::delete(
        object_store
            .filter(store_name.eq(store))
            .filter(object_key.eq(key)),
    )
    .execute(conn)
    .into_core()?;
    Ok(affected > 0)
}

fn validate_address(store: &str, key: &str) -> Result<()> {
    if store.trim().is_empty() {
        return Err(ValidationError::MissingField("store".to_string()).into());
    }
    if key.trim().is_empty() {
        return Err(ValidationError::MissingField("key".to_string()).into());
    }
    Ok(())
}

pub struct ObjectStoreRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ObjectStoreRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ObjectStoreTrait for ObjectStoreRepository {
    fn get_object(&self, store: &str, key: &str) -> Result<Option<Value>> {
        let mut conn = get_connection(&self.pool)?;
        load_record(&mut conn, store, key)
    }

    async fn put_object(&self, store: &str, value: Value, key: &str) -> Result<String> {
        validate_address(store, key)?;
        let store = store.to_string();
        let key = key.to_string();

        self.writer
            .exec(move |conn| {
                put_record(conn, &store, &key, &value)?;
                Ok(key)
            })
            .await
    }

    async fn delete_object(&self, store: &str, key: &str) -> Result<String> {
        let store = store.to_string();
        let key = key.to_string();

        self.writer
            .exec(move |conn| {
                delete_record(conn, &store, &key)?;
                Ok(key)
            })
            .await
    }

    fn get_all_objects(&self, store: &str) -> Result<BTreeMap<String, Value>> {
        let mut conn = get_connection(&self.pool)?;
        load_store(&mut conn, store)
    }
}
