//! Error handling for the live scoring core.

pub mod domain;
pub mod error_code;
pub mod network;
pub mod protocol;

pub use domain::{NotFoundKind, ScoringError};
pub use error_code::ErrorCode;
pub use network::NetworkError;
pub use protocol::ProtocolError;
