//! Error codes for the live scoring core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and appear verbatim in log fields.

use core::fmt;

/// Centralized error codes for dropped events and boundary failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Event rejection
    /// Event refers to an innings behind the tracker
    StaleEvent,
    /// Requested state change is not allowed from the current state
    InvalidTransition,
    /// Event was already applied
    DuplicateEvent,

    // Resource Not Found
    /// Player has no entry in the innings ledger
    PlayerNotFound,
    /// Innings has no ledger yet
    InningsNotFound,

    // Programmer errors
    /// Event shape violates its own contract
    MalformedEvent,
    /// Wire message could not be decoded
    BadPayload,

    // System Errors
    NetworkError,
    ConfigError,
    IoError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Event rejection
            Self::StaleEvent => "STALE_EVENT",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::DuplicateEvent => "DUPLICATE_EVENT",

            // Resource Not Found
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::InningsNotFound => "INNINGS_NOT_FOUND",

            // Programmer errors
            Self::MalformedEvent => "MALFORMED_EVENT",
            Self::BadPayload => "BAD_PAYLOAD",

            // System Errors
            Self::NetworkError => "NETWORK_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
