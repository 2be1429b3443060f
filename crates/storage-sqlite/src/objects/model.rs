//! Database model for stored objects.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One JSON document, addressed by store name and key.
#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::object_store)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecordDB {
    pub store_name: String,
    pub object_key: String,
    /// Serialized JSON text.
    pub object_value: String,
    pub updated_at: String,
}

impl ObjectRecordDB {
    pub fn new(store_name: &str, object_key: &str, object_value: String) -> Self {
        Self {
            store_name: store_name.to_string(),
            object_key: object_key.to_string(),
            object_value,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
