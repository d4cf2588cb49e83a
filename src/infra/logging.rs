//! Diagnostics setup. Logs go to stderr so stdout only carries the report.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `XTEST_LOG=debug`.
pub const LOG_ENV: &str = "XTEST_LOG";

/// Installs the global `tracing` subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
