//! Scoring-level error type used across the domain and the store.
//!
//! This error type is transport-agnostic. Everything except `Malformed`
//! is an expected condition under network reordering and retries: the
//! store logs and drops those instead of returning them as failures.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Batter,
    Bowler,
    Innings,
}

/// Central scoring error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Event refers to an innings or delivery the state has already moved past
    #[error("stale event: {0}")]
    Stale(String),
    /// State machine rejected the requested change
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    /// Update references an entry absent from the ledger
    #[error("not found {kind:?}: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    /// Entry already exists or event already applied
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// Event violates its own shape contract (programmer error)
    #[error("malformed event: {0}")]
    Malformed(String),
}

impl ScoringError {
    pub fn stale(detail: impl Into<String>) -> Self {
        Self::Stale(detail.into())
    }
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidTransition(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }
    pub fn duplicate(detail: impl Into<String>) -> Self {
        Self::Duplicate(detail.into())
    }
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Stale(_) => ErrorCode::StaleEvent,
            Self::InvalidTransition(_) => ErrorCode::InvalidTransition,
            Self::NotFound {
                kind: NotFoundKind::Innings,
                ..
            } => ErrorCode::InningsNotFound,
            Self::NotFound { .. } => ErrorCode::PlayerNotFound,
            Self::Duplicate(_) => ErrorCode::DuplicateEvent,
            Self::Malformed(_) => ErrorCode::MalformedEvent,
        }
    }

    /// True for conditions that are logged and dropped rather than raised.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}
