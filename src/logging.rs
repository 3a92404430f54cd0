use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "LOCKSCOUT_LOG";

/// Filter directive used when `LOCKSCOUT_LOG` is unset.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "info",
        (false, false) => "warn",
    }
}

fn filter_from(env_value: Option<String>, verbose: bool, quiet: bool) -> EnvFilter {
    let fallback = default_directive(verbose, quiet);
    env_value
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the global subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
///
/// Calling it twice keeps the first subscriber.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = filter_from(env::var(LOG_ENV).ok(), verbose, quiet);

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
