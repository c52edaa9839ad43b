// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up the logging framework using tracing_subscriber.
/// `RUST_LOG` wins when set; otherwise `default_directive` is used
/// ("info" normally, "debug" with `--verbose`).
pub fn setup_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_target(false) // Progress lines read like console output
        .init();

    tracing::debug!("Logging setup complete (default directive: {}).", default_directive);
}
