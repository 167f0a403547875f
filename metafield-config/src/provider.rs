//! Configuration provider using Figment

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::MetafieldConfig,
    ConfigResult,
};

/// Prefix of environment variables read by the provider. Nested keys are
/// separated by a double underscore: `METAFIELD_STORE__PATH`.
pub const ENV_PREFIX: &str = "METAFIELD_";

/// Configuration provider using figment
///
/// Sources are merged in precedence order (later sources override earlier ones):
/// 1. Built-in defaults
/// 2. Discovered configuration files, global then project
/// 3. Environment variables with the `METAFIELD_` prefix
/// 4. Explicit overrides (command line)
pub struct ConfigProvider {
    discovery: FileDiscovery,
    overrides: Figment,
}

impl ConfigProvider {
    /// Provider over the standard global and project directories.
    pub fn new() -> Self {
        Self::with_discovery(FileDiscovery::new())
    }

    /// Provider over a custom discovery.
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self {
            discovery,
            overrides: Figment::new(),
        }
    }

    /// Override one dotted key, e.g. `store.path`, above every other source.
    pub fn with_override<T: Serialize>(mut self, key: &str, value: T) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Load, merge and validate the configuration.
    pub fn load(self) -> ConfigResult<MetafieldConfig> {
        let config: MetafieldConfig = self.build_figment().extract()?;
        config.validate()?;
        debug!(
            store = %config.store.path.display(),
            journal_mode = config.store.journal_mode.as_pragma(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn build_figment(self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(MetafieldConfig::default()));

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(load_config_file(&config_file));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(self.overrides)
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config_file(config_file: &ConfigFile) -> Figment {
    let path = &config_file.path;
    match config_file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Json => Figment::from(Json::file(path)),
    }
}
