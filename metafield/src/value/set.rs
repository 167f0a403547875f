//! SetValue and SetValues commands

use chrono::Utc;
use metafield_fields::{coerce_value, FieldValue};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{Execute, MetafieldContext};
use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, ItemId};
use crate::store::{fields, tags, values};
use crate::types::ValueWrite;

fn validated(conn: &Connection, write: &ValueWrite) -> Result<FieldValue> {
    let field = fields::require(conn, &write.field_id)?;
    coerce_value(&field.config, &write.value).map_err(|source| MetafieldError::InvalidValue {
        field_id: field.id,
        source,
    })
}

/// Store one value for an item, replacing any previous one
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetValue {
    pub item_id: ItemId,
    #[serde(flatten)]
    pub write: ValueWrite,
}

impl SetValue {
    pub fn new(item_id: ItemId, field_id: FieldId, value: impl Into<serde_json::Value>) -> Self {
        Self {
            item_id,
            write: ValueWrite::new(field_id, value),
        }
    }
}

impl Execute for SetValue {
    type Output = FieldValue;

    fn execute(&self, ctx: &MetafieldContext) -> Result<FieldValue> {
        let value = ctx.store().write(|conn| {
            tags::require_item(conn, &self.item_id)?;
            let value = validated(conn, &self.write)?;
            values::upsert(
                conn,
                &self.item_id,
                &self.write.field_id,
                &value.clone().into_slots(),
                Utc::now(),
            )?;
            Ok(value)
        })?;
        debug!(
            item_id = %self.item_id,
            field_id = %self.write.field_id,
            kind = %value.kind(),
            "set value"
        );
        Ok(value)
    }
}

/// Store several values for one item, all or nothing.
///
/// Every write is validated before any is applied. When the same field
/// appears more than once the last write wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetValues {
    pub item_id: ItemId,
    pub writes: Vec<ValueWrite>,
}

impl SetValues {
    pub fn new(item_id: ItemId, writes: impl IntoIterator<Item = ValueWrite>) -> Self {
        Self {
            item_id,
            writes: writes.into_iter().collect(),
        }
    }
}

impl Execute for SetValues {
    type Output = usize;

    fn execute(&self, ctx: &MetafieldContext) -> Result<usize> {
        let written = ctx.store().write(|conn| {
            tags::require_item(conn, &self.item_id)?;
            let checked = self
                .writes
                .iter()
                .map(|write| -> Result<_> { Ok((write.field_id, validated(conn, write)?)) })
                .collect::<Result<Vec<_>>>()?;

            let now = Utc::now();
            for (field_id, value) in &checked {
                values::upsert(conn, &self.item_id, field_id, &value.clone().into_slots(), now)?;
            }
            Ok(checked.len())
        })?;
        debug!(item_id = %self.item_id, written, "set values");
        Ok(written)
    }
}
