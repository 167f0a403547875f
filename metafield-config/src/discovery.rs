//! Configuration file discovery
//!
//! Looks for `metafield.{toml,yaml,yml,json}` in the global directory
//! (`~/.metafield/`) and the project directory (`./.metafield/`). Global files
//! come first so project files override them when merged.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directory name searched in both the home and the working directory
pub const CONFIG_DIR_NAME: &str = ".metafield";

const FILE_NAMES: [&str; 4] = [
    "metafield.toml",
    "metafield.yaml",
    "metafield.yml",
    "metafield.json",
];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// `~/.metafield/`
    Global,
    /// `./.metafield/`
    Project,
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery rooted at the home directory and the current directory.
    pub fn new() -> Self {
        Self {
            global_dir: dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME)),
            project_dir: std::env::current_dir()
                .ok()
                .map(|cwd| cwd.join(CONFIG_DIR_NAME)),
        }
    }

    /// Discovery over explicit directories.
    pub fn with_dirs(global_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        Self {
            global_dir,
            project_dir,
        }
    }

    /// Discover all configuration files, lowest precedence first.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        if let Some(ref dir) = self.global_dir {
            files.extend(search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = self.project_dir {
            files.extend(search_directory(dir, ConfigScope::Project));
        }

        debug!("Discovered {} configuration files", files.len());
        files
    }
}

fn search_directory(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
    if !dir.exists() {
        trace!("Directory does not exist: {}", dir.display());
        return Vec::new();
    }
    if !dir.is_dir() {
        warn!("Path exists but is not a directory: {}", dir.display());
        return Vec::new();
    }

    FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|candidate| candidate.is_file())
        .filter_map(|path| {
            let format = ConfigFormat::from_extension(path.extension()?.to_str()?)?;
            trace!("Found config: {} ({:?})", path.display(), format);
            Some(ConfigFile {
                path,
                format,
                scope,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_global_before_project() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global");
        let project = temp.path().join("project");
        fs::create_dir_all(&global).unwrap();
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("metafield.yaml"), "log:\n  filter: debug\n").unwrap();
        fs::write(global.join("metafield.toml"), "[log]\nfilter = \"warn\"\n").unwrap();

        let files = FileDiscovery::with_dirs(Some(global), Some(project)).discover_all();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::Global);
        assert_eq!(files[0].format, ConfigFormat::Toml);
        assert_eq!(files[1].scope, ConfigScope::Project);
        assert_eq!(files[1].format, ConfigFormat::Yaml);
    }

    #[test]
    fn test_missing_directories_yield_nothing() {
        let temp = TempDir::new().unwrap();
        let files =
            FileDiscovery::with_dirs(Some(temp.path().join("nope")), None).discover_all();
        assert!(files.is_empty());
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("settings.toml"), "").unwrap();
        let files = FileDiscovery::with_dirs(None, Some(temp.path().to_path_buf())).discover_all();
        assert!(files.is_empty());
    }
}
