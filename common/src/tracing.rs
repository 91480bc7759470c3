use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes tracing for a binary.
///
/// Logs always go to stderr so that stdout only carries the output of the binary itself, which
/// callers are expected to capture.
///
/// - `rust_log`: Used as the filter if the RUST_LOG environment variable is not provided. You can set the default log level (e.g. `warn`),
///   but you can also configure module-specific log levels using comma-separated entries formatted like `path::to::module=log_level`, e.g.
///   `warn,bootstrap_token=debug,kube=info`
///
/// Setting `JSON_LOGS` switches the output to one flattened JSON object per line.
pub fn init_tracing(rust_log: &str) {
    let filter = env_filter(env::var("RUST_LOG").ok().as_deref(), rust_log);

    let registry = tracing_subscriber::registry().with(filter);

    if env::var_os("JSON_LOGS").is_some() {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .flatten_event(true)
            .with_span_list(false);

        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);

        registry.with(layer).init();
    }
}

fn env_filter(rust_log_env: Option<&str>, default: &str) -> EnvFilter {
    match rust_log_env {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(default),
    }
}
