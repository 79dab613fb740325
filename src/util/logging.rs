//! Tracing subscriber setup. Logs go to stderr so stdout stays clean for output.

use crate::constants;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `CREDMAN_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "credman=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. in tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
