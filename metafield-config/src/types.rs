//! Strongly typed configuration values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ConfigResult;

/// Path value that selects an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetafieldConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl MetafieldConfig {
    /// Reject values that would only fail later, at store open.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("store.path", "cannot be empty"));
        }
        if self.store.busy_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "store.busy_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::invalid_value("log.filter", "cannot be empty"));
        }
        Ok(())
    }
}

/// SQLite store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub path: PathBuf,
    /// How long a writer waits on a locked database before giving up
    pub busy_timeout_ms: u64,
    pub journal_mode: JournalMode,
}

impl StoreConfig {
    /// Settings for a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            journal_mode: JournalMode::Memory,
            ..Self::default()
        }
    }

    /// Settings for a database file at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".metafield").join("metafield.db"),
            busy_timeout_ms: 5_000,
            journal_mode: JournalMode::Wal,
        }
    }
}

/// SQLite journal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Memory,
}

impl JournalMode {
    /// Value for `PRAGMA journal_mode`.
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Memory => "MEMORY",
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive string
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
