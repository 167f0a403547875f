//! Metafield configuration management using Figment
//!
//! Loads a [`MetafieldConfig`] from, in increasing precedence:
//!
//! - built-in defaults
//! - `~/.metafield/metafield.{toml,yaml,yml,json}`
//! - `./.metafield/metafield.{toml,yaml,yml,json}`
//! - `METAFIELD_*` environment variables (`__` separates nested keys)
//! - explicit overrides passed to [`ConfigProvider::with_override`]
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! [store]
//! path = "/var/lib/metafield/metafield.db"
//! busy_timeout_ms = 2000
//! journal_mode = "wal"
//!
//! [log]
//! filter = "metafield=debug,info"
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use error::ConfigError;
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{JournalMode, LogConfig, MetafieldConfig, StoreConfig, IN_MEMORY_PATH};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load configuration from all standard sources.
pub fn load_configuration() -> ConfigResult<MetafieldConfig> {
    ConfigProvider::new().load()
}
