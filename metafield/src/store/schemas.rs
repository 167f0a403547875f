//! Row access for `schemas` and `schema_field_bindings`

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, SchemaId, Scope};
use crate::resolve::ReachableBinding;
use crate::store::conflict_on_unique;
use crate::store::fields::{field_from_row, FIELD_COLUMNS};
use crate::types::{Schema, SchemaBinding};
use crate::visibility::PlacedBinding;

const SCHEMA_COLUMNS: &str = "s.id, s.scope, s.name, s.description, s.created_at, s.updated_at";

fn schema_from_row(row: &Row<'_>) -> rusqlite::Result<Schema> {
    Ok(Schema {
        id: row.get(0)?,
        scope: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        bindings: Vec::new(),
    })
}

fn binding_from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<SchemaBinding> {
    Ok(SchemaBinding {
        display_order: row.get(at)?,
        show_on_summary: row.get(at + 1)?,
        field: field_from_row(row, at + 2)?,
    })
}

pub(crate) fn insert(conn: &Connection, schema: &Schema, name_key: &str) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO schemas (id, scope, name, name_key, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?
    .execute(params![
        schema.id,
        schema.scope,
        schema.name,
        name_key,
        schema.description,
        schema.created_at,
        schema.updated_at,
    ])
    .map_err(|e| conflict_on_unique(e, "schema", &schema.name))?;
    Ok(())
}

/// Persist name, description and `updated_at` of an existing schema.
pub(crate) fn update(conn: &Connection, schema: &Schema, name_key: &str) -> Result<()> {
    conn.prepare_cached(
        "UPDATE schemas SET name = ?2, name_key = ?3, description = ?4, updated_at = ?5
         WHERE id = ?1",
    )?
    .execute(params![
        schema.id,
        schema.name,
        name_key,
        schema.description,
        schema.updated_at,
    ])
    .map_err(|e| conflict_on_unique(e, "schema", &schema.name))?;
    Ok(())
}

pub(crate) fn touch(conn: &Connection, id: &SchemaId, now: DateTime<Utc>) -> Result<()> {
    conn.prepare_cached("UPDATE schemas SET updated_at = ?2 WHERE id = ?1")?
        .execute(params![id, now])?;
    Ok(())
}

/// Load a schema with its bindings in display order.
pub(crate) fn get(conn: &Connection, id: &SchemaId) -> Result<Option<Schema>> {
    let sql = format!("SELECT {SCHEMA_COLUMNS} FROM schemas s WHERE s.id = ?1");
    let schema = conn
        .prepare_cached(&sql)?
        .query_row([id], schema_from_row)
        .optional()?;
    match schema {
        Some(mut schema) => {
            schema.bindings = bindings(conn, id)?;
            Ok(Some(schema))
        }
        None => Ok(None),
    }
}

pub(crate) fn require(conn: &Connection, id: &SchemaId) -> Result<Schema> {
    get(conn, id)?.ok_or(MetafieldError::SchemaNotFound { id: *id })
}

pub(crate) fn exists(conn: &Connection, id: &SchemaId) -> Result<bool> {
    Ok(conn
        .prepare_cached("SELECT 1 FROM schemas WHERE id = ?1")?
        .query_row([id], |_| Ok(()))
        .optional()?
        .is_some())
}

/// Schemas of one scope, newest first, each with its bindings.
pub(crate) fn list(conn: &Connection, scope: &Scope) -> Result<Vec<Schema>> {
    let sql = format!(
        "SELECT {SCHEMA_COLUMNS} FROM schemas s WHERE s.scope = ?1
         ORDER BY s.created_at DESC, s.rowid DESC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let mut schemas = stmt
        .query_map([scope], schema_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let sql = format!(
        "SELECT b.schema_id, b.display_order, b.show_on_summary, {FIELD_COLUMNS}
         FROM schema_field_bindings b
         JOIN schemas s ON s.id = b.schema_id
         JOIN fields f ON f.id = b.field_id
         WHERE s.scope = ?1
         ORDER BY b.schema_id, b.display_order"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([scope], |row| {
        Ok((row.get::<_, SchemaId>(0)?, binding_from_row(row, 1)?))
    })?;
    let mut grouped: HashMap<SchemaId, Vec<SchemaBinding>> = HashMap::new();
    for row in rows {
        let (schema_id, binding) = row?;
        grouped.entry(schema_id).or_default().push(binding);
    }

    for schema in &mut schemas {
        schema.bindings = grouped.remove(&schema.id).unwrap_or_default();
    }
    Ok(schemas)
}

/// Whether another schema in `scope` already uses `name_key`.
pub(crate) fn name_taken(
    conn: &Connection,
    scope: &Scope,
    name_key: &str,
    except: Option<&SchemaId>,
) -> Result<bool> {
    let found: Option<SchemaId> = conn
        .prepare_cached("SELECT id FROM schemas WHERE scope = ?1 AND name_key = ?2")?
        .query_row(params![scope, name_key], |row| row.get(0))
        .optional()?;
    Ok(matches!(found, Some(id) if Some(&id) != except))
}

/// Delete the schema. Bindings cascade, tags are detached.
pub(crate) fn delete(conn: &Connection, id: &SchemaId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM schemas WHERE id = ?1")?
        .execute([id])?;
    Ok(removed > 0)
}

pub(crate) fn bindings(conn: &Connection, schema_id: &SchemaId) -> Result<Vec<SchemaBinding>> {
    let sql = format!(
        "SELECT b.display_order, b.show_on_summary, {FIELD_COLUMNS}
         FROM schema_field_bindings b
         JOIN fields f ON f.id = b.field_id
         WHERE b.schema_id = ?1
         ORDER BY b.display_order"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([schema_id], |row| binding_from_row(row, 0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn insert_binding(
    conn: &Connection,
    schema_id: &SchemaId,
    binding: &PlacedBinding,
) -> Result<()> {
    conn.prepare_cached(
        "INSERT INTO schema_field_bindings (schema_id, field_id, display_order, show_on_summary)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![
        schema_id,
        binding.field_id,
        binding.display_order,
        binding.show_on_summary,
    ])?;
    Ok(())
}

/// Rewrite order and summary flag of every binding in `placed`.
pub(crate) fn update_bindings(
    conn: &Connection,
    schema_id: &SchemaId,
    placed: &[PlacedBinding],
) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE schema_field_bindings SET display_order = ?3, show_on_summary = ?4
         WHERE schema_id = ?1 AND field_id = ?2",
    )?;
    for binding in placed {
        stmt.execute(params![
            schema_id,
            binding.field_id,
            binding.display_order,
            binding.show_on_summary,
        ])?;
    }
    Ok(())
}

pub(crate) fn delete_binding(
    conn: &Connection,
    schema_id: &SchemaId,
    field_id: &FieldId,
) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM schema_field_bindings WHERE schema_id = ?1 AND field_id = ?2")?
        .execute(params![schema_id, field_id])?;
    Ok(removed > 0)
}

/// Every binding of the given schemas, joined with field and schema name.
/// `schema_rank` is the position of the schema in `schema_ids`.
pub(crate) fn reachable_bindings(
    conn: &Connection,
    schema_ids: &[SchemaId],
) -> Result<Vec<ReachableBinding>> {
    if schema_ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; schema_ids.len()].join(", ");
    let sql = format!(
        "SELECT b.schema_id, s.name, b.display_order, b.show_on_summary, {FIELD_COLUMNS}
         FROM schema_field_bindings b
         JOIN schemas s ON s.id = b.schema_id
         JOIN fields f ON f.id = b.field_id
         WHERE b.schema_id IN ({placeholders})"
    );
    let rank: HashMap<SchemaId, usize> = schema_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(schema_ids.iter()), |row| {
        Ok((
            row.get::<_, SchemaId>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, u32>(2)?,
            row.get::<_, bool>(3)?,
            field_from_row(row, 4)?,
        ))
    })?;

    let mut reachable = Vec::new();
    for row in rows {
        let (schema_id, schema_name, display_order, show_on_summary, field) = row?;
        let Some(&schema_rank) = rank.get(&schema_id) else {
            continue;
        };
        reachable.push(ReachableBinding {
            schema_id,
            schema_name,
            schema_rank,
            display_order,
            show_on_summary,
            field,
        });
    }
    Ok(reachable)
}
