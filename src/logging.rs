use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Call once at startup; a second
/// call would panic inside `tracing_subscriber`, so embedding applications
/// that already installed a subscriber should skip this.
pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone()))
        .with_target(true)
        .json()
        .init();
}
