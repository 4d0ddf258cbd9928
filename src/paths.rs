//! Output folder resolution from `paths.json`.
//!
//! `paths.json` lives in the project root and maps logical folder keys to
//! directories:
//!
//! ```json
//! { "data_meta": "reference/data" }
//! ```
//!
//! Relative values are resolved against the directory holding `paths.json`.
//! Missing files and missing or blank keys are hard errors; no default is
//! ever substituted.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Key naming the metadata output folder.
pub const DATA_META: &str = "data_meta";

/// Default file name of the path configuration.
pub const PATHS_FILE: &str = "paths.json";

/// Parsed `paths.json`.
#[derive(Debug, Clone)]
pub struct PathConfig {
    file: PathBuf,
    root: PathBuf,
    entries: Map<String, Value>,
}

impl PathConfig {
    /// Load and parse the configuration file.
    pub fn load(file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = file.as_ref();
        let content = std::fs::read(file).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: file.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: file.to_path_buf(),
                    source,
                }
            }
        })?;
        let value: Value =
            serde_json::from_slice(&content).map_err(|e| ConfigError::InvalidJson {
                path: file.to_path_buf(),
                reason: e.to_string(),
            })?;
        let Value::Object(entries) = value else {
            return Err(ConfigError::NotAnObject {
                path: file.to_path_buf(),
            });
        };

        let root = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let root = std::path::absolute(&root).unwrap_or(root);

        Ok(Self {
            file: file.to_path_buf(),
            root,
            entries,
        })
    }

    /// Look up `key` without touching the file system.
    pub fn get(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let value = match self.entries.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => {
                return Err(ConfigError::MissingKey {
                    key: key.to_string(),
                    path: self.file.clone(),
                });
            }
        };

        let path = PathBuf::from(value);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.root.join(path))
        }
    }

    /// Resolve `key` to a directory, creating it if missing.
    pub fn resolve(&self, key: &str) -> Result<PathBuf, ConfigError> {
        let dir = self.get(key)?;
        std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(target: "paths", "resolved '{key}' to {}", dir.display());
        Ok(dir)
    }
}

/// Load `file` and resolve `key` in one step.
pub fn resolve_output_dir(file: impl AsRef<Path>, key: &str) -> Result<PathBuf, ConfigError> {
    PathConfig::load(file)?.resolve(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_relative_key() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(PATHS_FILE);
        fs::write(&file, r#"{"data_meta": "reference/data"}"#).unwrap();

        let dir = resolve_output_dir(&file, DATA_META).unwrap();
        assert!(dir.ends_with("reference/data"));
        assert!(dir.starts_with(std::path::absolute(temp_dir.path()).unwrap()));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_resolve_absolute_key() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("abs_out");
        let file = temp_dir.path().join(PATHS_FILE);
        let json = serde_json::json!({ "data_meta": target.to_string_lossy() });
        fs::write(&file, json.to_string()).unwrap();

        assert_eq!(resolve_output_dir(&file, DATA_META).unwrap(), target);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = PathConfig::load(temp_dir.path().join(PATHS_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_missing_and_blank_keys() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(PATHS_FILE);
        fs::write(&file, r#"{"src_gml": "code", "data_meta": "  ", "n": 3}"#).unwrap();

        let config = PathConfig::load(&file).unwrap();
        for key in ["data_meta", "data_tables", "n"] {
            let err = config.resolve(key).unwrap_err();
            assert!(matches!(err, ConfigError::MissingKey { .. }), "{key}");
        }
        assert!(config.get("src_gml").is_ok());
    }

    #[test]
    fn test_invalid_json_and_non_object() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(PATHS_FILE);

        fs::write(&file, "{ data_meta: ").unwrap();
        assert!(matches!(
            PathConfig::load(&file).unwrap_err(),
            ConfigError::InvalidJson { .. }
        ));

        fs::write(&file, r#"["data_meta"]"#).unwrap();
        assert!(matches!(
            PathConfig::load(&file).unwrap_err(),
            ConfigError::NotAnObject { .. }
        ));
    }

    #[test]
    fn test_unreadable_file_is_not_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(PATHS_FILE);
        fs::create_dir(&file).unwrap();

        let err = PathConfig::load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "{err}");
        assert!(err.to_string().starts_with("Cannot read"));
    }

    #[test]
    fn test_non_utf8_content_is_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join(PATHS_FILE);
        fs::write(&file, b"{\"data_meta\": \"\xff\"}").unwrap();

        assert!(matches!(
            PathConfig::load(&file).unwrap_err(),
            ConfigError::InvalidJson { .. }
        ));
    }
}
