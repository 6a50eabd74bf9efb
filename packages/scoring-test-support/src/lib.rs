//! Test support for the live scoring integration tests: logging setup and
//! builders for WebSocket frames and REST response bodies.

pub mod logging;
pub mod ws_fixtures;
