#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod logging;
pub mod protocol;
pub mod replay;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::scoring::ScoringConfig;
pub use domain::snapshot::MatchSnapshot;
pub use domain::{EventEnvelope, EventSource, ScoringEvent};
pub use error::AppError;
pub use errors::{ErrorCode, NetworkError, ProtocolError, ScoringError};
pub use services::{MatchSession, ScoringTransport};
pub use store::{DispatchOutcome, MatchStore};

// Prelude for test convenience
pub mod prelude {
    pub use super::config::scoring::*;
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::errors::*;
    pub use super::protocol::*;
    pub use super::store::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
