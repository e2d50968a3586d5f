use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `goldwatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid source '{value}', expected one of goldapi, jijinhao, qingyunke")]
    InvalidSource { value: String },

    #[error("timestamp must match YYYY-MM-DD HH:MM:SS: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero, got {value}")]
    NonPositiveValue { field: &'static str, value: String },
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },
}

/// Failures while reading or persisting the history log.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history file '{path}' could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("history file '{path}' could not be replaced: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while delivering a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(String),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("notification payload could not be encoded: {0}")]
    Serialization(String),
}
