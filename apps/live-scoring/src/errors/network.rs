//! Failures reported by a `ScoringTransport` implementation.
//!
//! The transport itself lives outside this crate; these variants are the
//! contract it reports through. None of them touch local state.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("transport failure: {detail}")]
    Transport { detail: String, retryable: bool },
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("could not decode response: {detail}")]
    Decode { detail: String },
}

impl NetworkError {
    /// Whether the UI should offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { retryable, .. } => *retryable,
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::Decode { .. } => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::NetworkError
    }
}
