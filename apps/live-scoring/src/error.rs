use thiserror::Error;

use crate::errors::{ErrorCode, NetworkError, ProtocolError, ScoringError};

/// Umbrella error for the session facade, the replay binary and config loading.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Protocol(err) => err.code(),
            AppError::Network(err) => err.code(),
            AppError::Scoring(err) => err.code(),
            AppError::Io(_) => ErrorCode::IoError,
        }
    }

    /// Whether the caller may retry the operation that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(err) if err.is_retryable())
    }
}
