use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},tower_http=info,axum=info")))
}

/// Initialize tracing subscriber with compact, human-readable output.
/// - Respects `RUST_LOG` if set
/// - Falls back to `default_level` for this service, `info` for tower_http and axum
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default(default_level: &str) {
    let _ = fmt()
        .with_env_filter(filter(default_level))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Span fields (`user.id`, `booking.class.id`, ...) land in the `span` object of each line.
pub fn init_logging_json(default_level: &str) {
    let _ = fmt()
        .with_env_filter(filter(default_level))
        .with_target(false)
        .json()
        .with_current_span(true)
        .with_writer(io::stdout)
        .try_init();
}
