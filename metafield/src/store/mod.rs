//! SQLite persistence for fields, schemas, tags, items and values
//!
//! One connection per [`Store`], guarded by a mutex. Every mutating operation
//! runs inside a single `BEGIN IMMEDIATE` transaction, so the write lock is
//! taken before the first read that the write depends on. Multi-statement
//! reads run inside a deferred transaction and see one snapshot.
//!
//! # Schema
//!
//! - `fields`: field definitions, unique on `(scope, name_key)`
//! - `schemas`: schemas, unique on `(scope, name_key)`
//! - `schema_field_bindings`: `(schema_id, field_id)` membership with order and summary flag
//! - `tags`, `items`, `item_tags`: tags, the items they label, and the labels applied
//! - `item_field_values`: one typed value per `(item_id, field_id)`

pub(crate) mod fields;
pub(crate) mod schemas;
pub(crate) mod tags;
pub(crate) mod values;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use metafield_config::StoreConfig;
use rusqlite::{ffi, Connection, TransactionBehavior};
use tracing::{debug, info};

use crate::error::{MetafieldError, Result};

/// Current on-disk layout version, kept in `PRAGMA user_version`
const SCHEMA_VERSION: i64 = 1;

/// Persistent store backing every metafield operation
///
/// `Send + Sync`: the connection lives behind a mutex, so one store can be
/// shared by every thread of a process. Separate processes (or separate
/// stores on the same file) are serialized by SQLite's write lock.
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (creating if needed) the store described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let (conn, path) = if config.is_in_memory() {
            (Connection::open_in_memory()?, None)
        } else {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            (Connection::open(&config.path)?, Some(config.path.clone()))
        };

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        let journal_mode: String = conn.pragma_update_and_check(
            None,
            "journal_mode",
            config.journal_mode.as_pragma(),
            |row| row.get(0),
        )?;

        let store = Self {
            conn: Mutex::new(conn),
            path,
        };
        store.create_schema()?;

        info!(
            path = %config.path.display(),
            journal_mode = %journal_mode,
            "opened metafield store"
        );
        Ok(store)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MetafieldError::Poisoned)
    }

    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS fields (
                id TEXT PRIMARY KEY,
                scope TEXT NOT NULL,
                name TEXT NOT NULL,
                name_key TEXT NOT NULL,
                kind TEXT NOT NULL,
                config TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (scope, name_key)
            );

            CREATE TABLE IF NOT EXISTS schemas (
                id TEXT PRIMARY KEY,
                scope TEXT NOT NULL,
                name TEXT NOT NULL,
                name_key TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (scope, name_key)
            );

            CREATE TABLE IF NOT EXISTS schema_field_bindings (
                schema_id TEXT NOT NULL REFERENCES schemas(id) ON DELETE CASCADE,
                field_id TEXT NOT NULL REFERENCES fields(id) ON DELETE RESTRICT,
                display_order INTEGER NOT NULL CHECK (display_order >= 0),
                show_on_summary INTEGER NOT NULL DEFAULT 0 CHECK (show_on_summary IN (0, 1)),
                PRIMARY KEY (schema_id, field_id)
            ) WITHOUT ROWID;

            CREATE TABLE IF NOT EXISTS tags (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                name_key TEXT NOT NULL UNIQUE,
                schema_id TEXT REFERENCES schemas(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS item_tags (
                item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                tag_id TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (item_id, tag_id)
            ) WITHOUT ROWID;

            CREATE TABLE IF NOT EXISTS item_field_values (
                item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                field_id TEXT NOT NULL REFERENCES fields(id) ON DELETE CASCADE,
                text_value TEXT,
                number_value INTEGER,
                bool_value INTEGER,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (item_id, field_id)
            ) WITHOUT ROWID;

            CREATE INDEX IF NOT EXISTS idx_bindings_field ON schema_field_bindings(field_id);
            CREATE INDEX IF NOT EXISTS idx_tags_schema ON tags(schema_id);
            CREATE INDEX IF NOT EXISTS idx_item_tags_tag ON item_tags(tag_id);
            CREATE INDEX IF NOT EXISTS idx_values_field ON item_field_values(field_id);
            "#,
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        debug!(version = SCHEMA_VERSION, "store schema ready");
        Ok(())
    }

    /// Run `f` inside one deferred transaction.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Run `f` inside one immediate transaction. Any error rolls back every
    /// statement `f` executed.
    pub(crate) fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

/// True when `err` is a UNIQUE or PRIMARY KEY violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Map a unique violation on insert or rename to [`MetafieldError::Conflict`].
pub(crate) fn conflict_on_unique(
    err: rusqlite::Error,
    resource: &'static str,
    name: &str,
) -> MetafieldError {
    if is_unique_violation(&err) {
        MetafieldError::conflict(resource, name)
    } else {
        MetafieldError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_in_memory_creates_tables() {
        let store = Store::open_in_memory().unwrap();
        let tables: Vec<String> = store
            .read(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
            })
            .unwrap();
        for expected in [
            "fields",
            "item_field_values",
            "item_tags",
            "items",
            "schema_field_bindings",
            "schemas",
            "tags",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
        assert!(store.path().is_none());
    }

    #[test]
    fn test_open_file_creates_parent_and_reopens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("metafield.db");
        let config = StoreConfig::at_path(&path);

        Store::open(&config).unwrap();
        assert!(path.exists());

        let store = Store::open(&config).unwrap();
        let version: i64 = store
            .read(|conn| Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .write(|conn| {
                conn.execute(
                    "INSERT INTO item_tags (item_id, tag_id) VALUES ('missing', 'missing')",
                    [],
                )?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, MetafieldError::Store(_)));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let store = Store::open_in_memory().unwrap();
        let result: Result<()> = store.write(|conn| {
            conn.execute(
                "INSERT INTO items (id, label, created_at) VALUES ('a', 'x', '2024-01-01T00:00:00Z')",
                [],
            )?;
            Err(MetafieldError::conflict("item", "x"))
        });
        assert!(result.is_err());

        let count: i64 = store
            .read(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
