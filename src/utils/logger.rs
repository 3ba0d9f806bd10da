use std::io::Stderr;
use tracing_subscriber::fmt::{self, format::DefaultFields, format::Format};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type StderrLayer<S> = fmt::Layer<S, DefaultFields, Format, fn() -> Stderr>;

/// RUST_LOG wins; otherwise the given directive.
fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// stdout carries the report, so every log line goes to stderr.
fn stderr_layer<S>() -> StderrLayer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr as fn() -> Stderr)
}

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        "wayfarer_keys=debug,warn"
    } else {
        "wayfarer_keys=warn"
    };

    tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(stderr_layer().compact())
        .init();
}

/// JSON lines, for CI jobs that collect structured logs.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter("wayfarer_keys=info"))
        .with(stderr_layer().json())
        .init();
}
