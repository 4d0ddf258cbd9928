//! JSON result envelope for CLI commands.
//!
//! Printed instead of human text when `--json` is passed, so scripts can
//! check the outcome without scraping stdout.

use serde::{Deserialize, Serialize};

use super::ExitCode;
use crate::error::ExportError;

/// Schema version for this envelope format.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Operation outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Operation succeeded with results
    Success,
    /// Operation succeeded but found nothing
    NotFound,
    /// Operation failed
    Error,
}

/// Machine-readable result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    Ok,
    NotFound,
    PreconditionUnmet,
    ConfigError,
    IoError,
    InvalidData,
}

impl From<&ExportError> for ResultCode {
    fn from(err: &ExportError) -> Self {
        match err {
            ExportError::PreconditionUnmet { .. } => Self::PreconditionUnmet,
            ExportError::Configuration(_) => Self::ConfigError,
            ExportError::Io { .. } => Self::IoError,
            ExportError::Serialization(_) | ExportError::InvalidSnapshot { .. } => {
                Self::InvalidData
            }
        }
    }
}

/// Unified JSON output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    /// Operation outcome
    pub status: Status,

    /// Machine-readable result code
    pub code: ResultCode,

    /// Unix exit code (0-255)
    pub exit_code: u8,

    /// Human-readable message
    pub message: String,

    /// Recovery suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Result payload (null on error)
    pub data: Option<T>,

    /// Response metadata
    pub meta: Meta,
}

/// Response metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version (semver)
    pub schema_version: String,

    /// Number of items in data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Execution time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            count: None,
            duration_ms: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Create a success envelope with data.
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            code: ResultCode::Ok,
            exit_code: ExitCode::Success as u8,
            message: "Operation completed successfully".to_string(),
            suggestions: Vec::new(),
            data: Some(data),
            meta: Meta::default(),
        }
    }

    /// Create a not-found envelope.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: Status::NotFound,
            code: ResultCode::NotFound,
            exit_code: ExitCode::GeneralError as u8,
            message: message.into(),
            suggestions: Vec::new(),
            data: None,
            meta: Meta::default(),
        }
    }

    /// Create an error envelope from an export failure.
    pub fn from_error(err: &ExportError) -> Self {
        Self {
            status: Status::Error,
            code: ResultCode::from(err),
            exit_code: err.exit_code() as u8,
            message: err.to_string(),
            suggestions: err.suggestions(),
            data: None,
            meta: Meta::default(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.meta.duration_ms = Some(duration_ms);
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string_pretty(self)
    }
}
