//! Configuration module for metamap.
//!
//! Settings are layered:
//! - Default values
//! - TOML configuration file (`.metamap/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the commands)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `METAMAP_` and use double
//! underscores to separate nested levels:
//! - `METAMAP_PATHS__OUTPUT_KEY=data_meta` sets `paths.output_key`
//! - `METAMAP_SOURCE__SNAPSHOT=dump.json` sets `source.snapshot`
//! - `METAMAP_LOGGING__DEFAULT=debug` sets `logging.default`
//!
//! This is separate from `paths.json`, which belongs to the project being
//! exported and is read by [`crate::paths`].

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::paths::{DATA_META, PATHS_FILE};

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".metamap";
const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "METAMAP_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Where output folders are configured
    #[serde(default)]
    pub paths: PathsConfig,

    /// Where records come from
    #[serde(default)]
    pub source: SourceConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    /// Location of `paths.json`
    #[serde(default = "default_paths_file")]
    pub file: PathBuf,

    /// Key in `paths.json` naming the output folder
    #[serde(default = "default_output_key")]
    pub output_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SourceConfig {
    /// Host snapshot to read when `--snapshot` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for every target
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `export = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_paths_file() -> PathBuf {
    PathBuf::from(PATHS_FILE)
}
fn default_output_key() -> String {
    DATA_META.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            paths: PathsConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            file: default_paths_file(),
            output_key: default_output_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources, finding the settings file by
    /// walking up from the current directory.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".") // Double underscore becomes dot
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.metamap/settings.toml` in the current directory or an ancestor.
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(SETTINGS_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create `.metamap/settings.toml` and a `paths.json` template in `dir`.
    ///
    /// Existing files are kept unless `force` is set. Returns the files that
    /// were written.
    pub fn init_config_files(
        dir: &Path,
        force: bool,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut written = Vec::new();

        let settings_path = dir.join(CONFIG_DIR).join(SETTINGS_FILE);
        if force || !settings_path.exists() {
            Settings::default().save(&settings_path)?;
            written.push(settings_path);
        }

        let paths_path = dir.join(PATHS_FILE);
        if force || !paths_path.exists() {
            let template = BTreeMap::from([(DATA_META, "reference/data")]);
            std::fs::write(&paths_path, serde_json::to_string_pretty(&template)?)?;
            written.push(paths_path);
        }

        Ok(written)
    }
}
