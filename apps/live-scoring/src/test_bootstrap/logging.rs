#![cfg(test)]

//! Tracing for unit tests.
//!
//! Many scoring tests feed events the core is meant to reject, and every
//! rejection is logged by `logging::scoring`. That target is held at
//! `error` by default so expected drops stay out of test output; set
//! `TEST_LOG` (or `RUST_LOG`) to see them.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Default when neither variable is set.
pub const QUIET_DIRECTIVE: &str = "warn,live_scoring::logging::scoring=error";

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(QUIET_DIRECTIVE));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

mod tests {
    use super::*;

    #[test]
    fn quiet_directive_parses() {
        assert!(EnvFilter::try_new(QUIET_DIRECTIVE).is_ok());
    }
}
