//! Tracing setup shared by unit and integration tests

use std::sync::Once;

use tracing::info;
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a stderr subscriber for `tasktree` events once per test binary.
///
/// `RUST_LOG` selects the level; without it only warnings are shown.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter_fn(|metadata| metadata.target().starts_with("tasktree")))
            .with_filter(env_filter);

        // another harness may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_ok() {
            info!("test logging initialised");
        }
    });
}
