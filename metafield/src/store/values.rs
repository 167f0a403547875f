//! Row access for `item_field_values`

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use metafield_fields::ValueSlots;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::ids::{FieldId, ItemId};

/// Insert or replace the value of one (item, field) pair.
pub(crate) fn upsert(
    conn: &Connection,
    item_id: &ItemId,
    field_id: &FieldId,
    slots: &ValueSlots,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO item_field_values
             (item_id, field_id, text_value, number_value, bool_value, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT (item_id, field_id) DO UPDATE SET
             text_value = excluded.text_value,
             number_value = excluded.number_value,
             bool_value = excluded.bool_value,
             updated_at = excluded.updated_at",
    )?
    .execute(params![
        item_id,
        field_id,
        slots.text,
        slots.number,
        slots.boolean,
        now,
    ])?;
    Ok(())
}

/// Remove a value. Returns false when none was stored.
pub(crate) fn delete(conn: &Connection, item_id: &ItemId, field_id: &FieldId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM item_field_values WHERE item_id = ?1 AND field_id = ?2")?
        .execute(params![item_id, field_id])?;
    Ok(removed > 0)
}

/// Raw slots of every value stored for an item.
pub(crate) fn for_item(conn: &Connection, item_id: &ItemId) -> Result<HashMap<FieldId, ValueSlots>> {
    let mut stmt = conn.prepare_cached(
        "SELECT field_id, text_value, number_value, bool_value
         FROM item_field_values WHERE item_id = ?1",
    )?;
    let rows = stmt.query_map([item_id], |row| {
        Ok((
            row.get::<_, FieldId>(0)?,
            ValueSlots {
                text: row.get(1)?,
                number: row.get(2)?,
                boolean: row.get(3)?,
            },
        ))
    })?;
    Ok(rows.collect::<rusqlite::Result<HashMap<_, _>>>()?)
}
