// crates/runny-cli/src/logging.rs - Structured logging to stderr
//
// stdout is reserved for command output (--print), so logs always go to
// stderr. RUST_LOG wins over the configured level when it is set.

use runny_core::LogLevel;
use tracing_subscriber::EnvFilter;

/// Build the filter: RUST_LOG if valid, else `level` for everything
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level = %level, "logging initialized");
    }
}
