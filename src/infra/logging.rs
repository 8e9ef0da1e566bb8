//! Structured logging setup
//!
//! Level defaults to INFO; override with RUST_LOG (e.g. RUST_LOG=debug for
//! per-sample decisions).

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, plain or JSON lines
///
/// Logs go to stderr so reports on stdout stay machine-readable.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
