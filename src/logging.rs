//! Logging configuration using tracing

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "POLKADOTS_LOG";

/// Initialize the logging subsystem
///
/// Logs go to stderr so stdout stays clean for command output. The level is
/// controlled by `POLKADOTS_LOG`.
///
/// # Examples
/// ```bash
/// POLKADOTS_LOG=debug polkadots render in.jpg out.png
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("polkadots=info,warn"));

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
