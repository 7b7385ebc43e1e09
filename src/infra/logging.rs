//! tracing subscriber setup. Logs go to stderr so stdout stays pipeable.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Pick the log filter: `RUST_LOG` wins, then the explicit level, then the
/// configured default. `--quiet` caps the fallback at `warn`.
pub fn resolve_filter(explicit: Option<&str>, configured: &str, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (explicit, quiet) {
        (Some(level), _) => level,
        (None, true) => "warn",
        (None, false) => configured,
    };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(explicit: Option<&str>, configured: &str, quiet: bool, no_color: bool) {
    let filter = resolve_filter(explicit, configured, quiet);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(!no_color),
        )
        .try_init();
}
