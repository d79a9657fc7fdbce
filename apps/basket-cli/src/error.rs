//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                                                                │
//! │     │                                                                   │
//! │     ├── spec file unreadable?   ── io::Error ─────────┐                │
//! │     ├── spec file not JSON?     ── serde_json::Error ─┤                │
//! │     ├── bad environment?        ── ConfigError ───────┼──► CliError    │
//! │     └── item rejected?          ── CoreError ─────────┘       │        │
//! │                                                               ▼        │
//! │                                      stderr: "[CODE] message", exit 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use basket_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Error codes for machine consumption (JSON output, scripts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// An item spec failed validation
    ValidationError,

    /// A domain rule was violated
    BusinessLogic,

    /// Bad environment configuration
    ConfigError,

    /// Spec file could not be read
    IoError,

    /// Spec file is not valid JSON for a list of items
    ParseError,

    /// Anything else
    Internal,
}

/// Every failure a command can report.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Cart state lock poisoned")]
    LockPoisoned,
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            CliError::Core(_) => ErrorCode::BusinessLogic,
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Io { .. } => ErrorCode::IoError,
            CliError::Parse { .. } => ErrorCode::ParseError,
            CliError::Encode(_) | CliError::LockPoisoned => ErrorCode::Internal,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(err.into())
    }
}

/// Serializable view of a failure for `--output json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CliError> for ErrorReport {
    fn from(err: &CliError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
