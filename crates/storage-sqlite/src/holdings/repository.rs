use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use log::warn;
use serde_json::Value;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::objects::{delete_record, insert_record, load_record, load_store, put_record};
use dealview_core::errors::Result;
use dealview_core::holdings::{Holding, HoldingError, HoldingRepositoryTrait, HoldingSide};

const ALL_SIDES: [HoldingSide; 2] = [HoldingSide::Asset, HoldingSide::Liability];

/// Holdings live as JSON documents in the object store, one store per side,
/// keyed by holding id.
pub struct HoldingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// The store a document sits in decides its side.
fn decode_holding(value: Value, side: HoldingSide) -> Result<Holding> {
    let mut holding: Holding = serde_json::from_value(value).map_err(StorageError::from)?;
    if holding.side != side {
        warn!(
            "Holding {} is stored as {} but records side {}",
            holding.id,
            side.as_str(),
            holding.side.as_str()
        );
        holding.side = side;
    }
    Ok(holding)
}

fn encode_holding(holding: &Holding) -> Result<Value> {
    serde_json::to_value(holding).map_err(|e| StorageError::from(e).into())
}

fn load_side(conn: &mut SqliteConnection, side: HoldingSide) -> Result<Vec<Holding>> {
    load_store(conn, side.store_name())?
        .into_values()
        .map(|value| decode_holding(value, side))
        .collect()
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn list(&self, side: Option<HoldingSide>) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        match side {
            Some(side) => load_side(&mut conn, side),
            None => {
                let mut holdings = Vec::new();
                for side in ALL_SIDES {
                    holdings.extend(load_side(&mut conn, side)?);
                }
                Ok(holdings)
            }
        }
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        for side in ALL_SIDES {
            if let Some(value) = load_record(&mut conn, side.store_name(), holding_id)? {
                return decode_holding(value, side).map(Some);
            }
        }
        Ok(None)
    }

    async fn insert(&self, holding: Holding) -> Result<Holding> {
        let value = encode_holding(&holding)?;
        self.writer
            .exec(move |conn| {
                // Ids are unique across both stores, not just within one.
                for side in ALL_SIDES {
                    if load_record(conn, side.store_name(), &holding.id)?.is_some() {
                        return Err(HoldingError::AlreadyExists(holding.id).into());
                    }
                }
                insert_record(conn, holding.side.store_name(), &holding.id, &value)?;
                Ok(holding)
            })
            .await
    }

    async fn update(&self, holding: Holding, previous_side: HoldingSide) -> Result<Holding> {
        let value = encode_holding(&holding)?;
        self.writer
            .exec(move |conn| {
                if load_record(conn, previous_side.store_name(), &holding.id)?.is_none() {
                    return Err(HoldingError::NotFound(holding.id).into());
                }
                if previous_side != holding.side {
                    delete_record(conn, previous_side.store_name(), &holding.id)?;
                }
                put_record(conn, holding.side.store_name(), &holding.id, &value)?;
                Ok(holding)
            })
            .await
    }

    async fn delete(&self, holding_id: &str, side: HoldingSide) -> Result<String> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn| {
                delete_record(conn, side.store_name(), &holding_id)?;
                Ok(holding_id)
            })
            .await
    }
}
