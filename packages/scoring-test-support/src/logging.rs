//! Tracing for the live-scoring integration tests.
//!
//! Scenario tests replay socket frames that are expected to be dropped, so
//! the drop-log target defaults to `error`. `TEST_LOG` or `RUST_LOG`
//! overrides it.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

pub const QUIET_DIRECTIVE: &str = "warn,live_scoring::logging::scoring=error";

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a test-writer subscriber once per process.
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
