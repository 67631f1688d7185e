//! Tracing setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "EXPENSE_LEDGER_LOG";

/// Directive used when [`LOG_ENV`] is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "expense_ledger=info";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, writing to stderr. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
