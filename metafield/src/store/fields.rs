//! Row access for the `fields` table

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, Scope};
use crate::store::conflict_on_unique;
use crate::types::Field;

/// Column list for [`field_from_row`], usable with a table alias `f`.
pub(crate) const FIELD_COLUMNS: &str = "f.id, f.scope, f.name, f.config, f.created_at, f.updated_at";

/// Build a [`Field`] from the six [`FIELD_COLUMNS`] starting at `at`.
pub(crate) fn field_from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<Field> {
    let config_json: String = row.get(at + 3)?;
    let config = serde_json::from_str(&config_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(at + 3, Type::Text, Box::new(e)))?;
    Ok(Field {
        id: row.get(at)?,
        scope: row.get(at + 1)?,
        name: row.get(at + 2)?,
        config,
        created_at: row.get(at + 4)?,
        updated_at: row.get(at + 5)?,
    })
}

pub(crate) fn insert(conn: &Connection, field: &Field, name_key: &str) -> Result<()> {
    let config = serde_json::to_string(&field.config)?;
    conn.prepare_cached(
        "INSERT INTO fields (id, scope, name, name_key, kind, config, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?
    .execute(params![
        field.id,
        field.scope,
        field.name,
        name_key,
        field.kind().as_str(),
        config,
        field.created_at,
        field.updated_at,
    ])
    .map_err(|e| conflict_on_unique(e, "field", &field.name))?;
    Ok(())
}

pub(crate) fn update(conn: &Connection, field: &Field, name_key: &str) -> Result<()> {
    let config = serde_json::to_string(&field.config)?;
    conn.prepare_cached(
        "UPDATE fields SET name = ?2, name_key = ?3, kind = ?4, config = ?5, updated_at = ?6
         WHERE id = ?1",
    )?
    .execute(params![
        field.id,
        field.name,
        name_key,
        field.kind().as_str(),
        config,
        field.updated_at,
    ])
    .map_err(|e| conflict_on_unique(e, "field", &field.name))?;
    Ok(())
}

pub(crate) fn get(conn: &Connection, id: &FieldId) -> Result<Option<Field>> {
    let sql = format!("SELECT {FIELD_COLUMNS} FROM fields f WHERE f.id = ?1");
    Ok(conn
        .prepare_cached(&sql)?
        .query_row([id], |row| field_from_row(row, 0))
        .optional()?)
}

pub(crate) fn require(conn: &Connection, id: &FieldId) -> Result<Field> {
    get(conn, id)?.ok_or(MetafieldError::FieldNotFound { id: *id })
}

/// Fields of one scope, newest first.
pub(crate) fn list(conn: &Connection, scope: &Scope) -> Result<Vec<Field>> {
    let sql = format!(
        "SELECT {FIELD_COLUMNS} FROM fields f WHERE f.scope = ?1
         ORDER BY f.created_at DESC, f.rowid DESC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([scope], |row| field_from_row(row, 0))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Whether another field in `scope` already uses `name_key`.
pub(crate) fn name_taken(
    conn: &Connection,
    scope: &Scope,
    name_key: &str,
    except: Option<&FieldId>,
) -> Result<bool> {
    let found: Option<FieldId> = conn
        .prepare_cached("SELECT id FROM fields WHERE scope = ?1 AND name_key = ?2")?
        .query_row(params![scope, name_key], |row| row.get(0))
        .optional()?;
    Ok(matches!(found, Some(id) if Some(&id) != except))
}

/// Number of schemas binding the field.
pub(crate) fn binding_count(conn: &Connection, id: &FieldId) -> Result<usize> {
    let count: i64 = conn
        .prepare_cached("SELECT COUNT(*) FROM schema_field_bindings WHERE field_id = ?1")?
        .query_row([id], |row| row.get(0))?;
    usize::try_from(count)
        .map_err(|_| MetafieldError::Store(rusqlite::Error::IntegralValueOutOfRange(0, count)))
}

/// Delete the field and, by cascade, its stored values.
pub(crate) fn delete(conn: &Connection, id: &FieldId) -> Result<bool> {
    let removed = conn
        .prepare_cached("DELETE FROM fields WHERE id = ?1")?
        .execute([id])?;
    Ok(removed > 0)
}
