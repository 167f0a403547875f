use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{FieldId, ItemId, SchemaId, TagId};

/// A label applied to items. At most one schema is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub schema_id: Option<SchemaId>,
    pub created_at: DateTime<Utc>,
}

/// A taggable item that carries field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of a batch value write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueWrite {
    pub field_id: FieldId,
    pub value: serde_json::Value,
}

impl ValueWrite {
    pub fn new(field_id: FieldId, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field_id,
            value: value.into(),
        }
    }
}
