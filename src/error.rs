//! Error types for export operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::io::ExitCode;

/// Errors from loading or resolving `paths.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Configuration file not found: {path}\nCopy 'paths.json.example' to 'paths.json' or run 'metamap init'."
    )]
    NotFound { path: PathBuf },

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {reason}")]
    InvalidJson { path: PathBuf, reason: String },

    #[error("Configuration file {path} must contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Missing key '{key}' in {path}")]
    MissingKey { key: String, path: PathBuf },

    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No snapshot given")]
    MissingSnapshot,
}

/// Errors surfaced by the export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot export: {reason}")]
    PreconditionUnmet { reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid snapshot {path}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::PreconditionUnmet { .. } => ExitCode::PreconditionUnmet,
            Self::Configuration(_) => ExitCode::ConfigError,
            Self::Io { .. } => ExitCode::IoError,
            Self::Serialization(_) | Self::InvalidSnapshot { .. } => ExitCode::InvalidData,
        }
    }

    /// Recovery hints shown next to the error message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PreconditionUnmet { .. } => vec![
                "Re-export the snapshot from a data file that still carries its code".to_string(),
            ],
            Self::Configuration(ConfigError::NotFound { .. }) => {
                vec!["Run 'metamap init' to create a paths.json template".to_string()]
            }
            Self::Configuration(ConfigError::MissingKey { key, .. }) => {
                vec![format!("Add a non-empty \"{key}\" entry to paths.json")]
            }
            Self::Configuration(ConfigError::MissingSnapshot) => vec![
                "Pass --snapshot <FILE> or set source.snapshot in .metamap/settings.toml"
                    .to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = ExportError::PreconditionUnmet {
            reason: "compiled".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::PreconditionUnmet);

        let err: ExportError = ConfigError::MissingKey {
            key: "data_meta".to_string(),
            path: PathBuf::from("paths.json"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);
        assert_eq!(err.to_string(), "Missing key 'data_meta' in paths.json");
        assert_eq!(err.suggestions().len(), 1);

        let err = ExportError::io(
            "out/x.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.exit_code(), ExitCode::IoError);
        assert!(err.to_string().contains("out/x.json"));
    }

    #[test]
    fn test_missing_snapshot_hint() {
        let err: ExportError = ConfigError::MissingSnapshot.into();
        assert_eq!(err.exit_code(), ExitCode::ConfigError);

        let hints = err.suggestions();
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("--snapshot"));
        assert!(!hints[0].contains("Re-export"));
    }
}
