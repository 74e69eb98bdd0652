use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Filter used when the binary is started with `--debug`.
pub const DEBUG_FILTER: &str = "debug,tower_http=debug,axum=info";

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    init_logging(DEFAULT_FILTER, false);
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, otherwise uses [`DEFAULT_FILTER`]
/// - Emits structured JSON logs for better machine parsing
pub fn init_logging_json() {
    init_logging(DEFAULT_FILTER, true);
}

/// Initialize tracing with an explicit fallback filter and output format.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(fallback_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logging_default();
        init_logging_json();
        init_logging(DEBUG_FILTER, false);
    }
}
