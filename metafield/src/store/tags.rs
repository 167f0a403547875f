//! Row access for `tags`, `items` and `item_tags`

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{MetafieldError, Result};
use crate::ids::{ItemId, SchemaId, TagId};
use crate::store::conflict_on_unique;
use crate::types::{Item, Tag};

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        schema_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub(crate) fn insert_tag(conn: &Connection, tag: &Tag, name_key: &str) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO tags (id, name, name_key, schema_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?
    .execute(params![tag.id, tag.name, name_key, tag.schema_id, tag.created_at])
    .map_err(|e| conflict_on_unique(e, "tag", &tag.name))?;
    Ok(())
}

pub(crate) fn get_tag(conn: &Connection, id: &TagId) -> Result<Option<Tag>> {
    Ok(conn
        .prepare_cached("SELECT id, name, schema_id, created_at FROM tags WHERE id = ?1")?
        .query_row([id], tag_from_row)
        .optional()?)
}

pub(crate) fn require_tag(conn: &Connection, id: &TagId) -> Result<Tag> {
    get_tag(conn, id)?.ok_or(MetafieldError::TagNotFound { id: *id })
}

/// All tags by name.
pub(crate) fn list_tags(conn: &Connection) -> Result<Vec<Tag>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, schema_id, created_at FROM tags ORDER BY name_key, id")?;
    let rows = stmt.query_map([], tag_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn set_tag_schema(
    conn: &Connection,
    id: &TagId,
    schema_id: Option<&SchemaId>,
) -> Result<()> {
    conn.prepare_cached("UPDATE tags SET schema_id = ?2 WHERE id = ?1")?
        .execute(params![id, schema_id])?;
    Ok(())
}

pub(crate) fn delete_tag(conn: &Connection, id: &TagId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM tags WHERE id = ?1")?
        .execute([id])?;
    Ok(removed > 0)
}

/// Tags applied to an item, ordered by name then id. This order decides
/// which schema is encountered first during resolution.
pub(crate) fn tags_for_item(conn: &Connection, item_id: &ItemId) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id, t.name, t.schema_id, t.created_at
         FROM item_tags it JOIN tags t ON t.id = it.tag_id
         WHERE it.item_id = ?1
         ORDER BY t.name_key, t.id",
    )?;
    let rows = stmt.query_map([item_id], tag_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn insert_item(conn: &Connection, item: &Item) -> Result<()> {
    conn.prepare_cached("INSERT INTO items (id, label, created_at) VALUES (?1, ?2, ?3)")?
        .execute(params![item.id, item.label, item.created_at])?;
    Ok(())
}

pub(crate) fn get_item(conn: &Connection, id: &ItemId) -> Result<Option<Item>> {
    Ok(conn
        .prepare_cached("SELECT id, label, created_at FROM items WHERE id = ?1")?
        .query_row([id], |row| {
            Ok(Item {
                id: row.get(0)?,
                label: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?)
}

pub(crate) fn require_item(conn: &Connection, id: &ItemId) -> Result<Item> {
    get_item(conn, id)?.ok_or(MetafieldError::ItemNotFound { id: *id })
}

/// Delete the item with its tag links and values.
pub(crate) fn delete_item(conn: &Connection, id: &ItemId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM items WHERE id = ?1")?
        .execute([id])?;
    Ok(removed > 0)
}

/// Apply a tag. Returns false when it was already applied.
pub(crate) fn tag_item(conn: &Connection, item_id: &ItemId, tag_id: &TagId) -> Result<bool> {
    let added = conn
        .prepare_cached("INSERT OR IGNORE INTO item_tags (item_id, tag_id) VALUES (?1, ?2)")?
        .execute(params![item_id, tag_id])?;
    Ok(added > 0)
}

/// Remove a tag. Returns false when it was not applied.
pub(crate) fn untag_item(conn: &Connection, item_id: &ItemId, tag_id: &TagId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM item_tags WHERE item_id = ?1 AND tag_id = ?2")?
        .execute(params![item_id, tag_id])?;
    Ok(removed > 0)
}
