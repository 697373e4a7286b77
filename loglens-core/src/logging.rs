use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the process-wide subscriber.
///
/// Normally this is JSON on stderr with flattened fields, filtered by `RUST_LOG`
/// (falling back to `info`). Stdout is left to the report and the run summary.
///
/// With `TOKIO_CONSOLE` set the console-subscriber layer is installed instead,
/// and nothing else may be registered alongside it.
pub fn init_logging() {
    if std::env::var_os("TOKIO_CONSOLE").is_some() {
        console_subscriber::init();
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .init();
}
