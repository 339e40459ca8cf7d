//! Tracing subscriber setup for the binary
//!
//! Logs go to stderr so stdout stays clean for command output. `RUST_LOG`
//! overrides the default level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "cashpilot=debug"
    } else {
        "cashpilot=info"
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
