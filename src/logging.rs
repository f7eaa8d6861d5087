//! Logging setup.
//!
//! Logs go to **stderr** through a `tracing` subscriber so stdout stays free
//! for the plugin handshake. Filtering follows `RUST_LOG`.
//!
//! ```bash
//! # Lifecycle callbacks and API calls
//! RUST_LOG=vercel_provider=debug ./terraform-provider-vercel
//!
//! # Only the HTTP client
//! RUST_LOG=warn,vercel_provider::client=trace ./terraform-provider-vercel
//! ```
//!
//! Secrets (the API token, environment variable values) are never recorded.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging, defaulting to `info` when `RUST_LOG` is unset.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Initialize logging with a custom default level.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if a subscriber is already set.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

#[cfg(test)]
mod tests {
    // The global subscriber can only be set once per process, so only the
    // filter directives are checked here.

    use super::*;

    #[test]
    fn test_env_filter_parsing() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("vercel_provider=debug").is_ok());
        assert!(EnvFilter::try_new("warn,vercel_provider::client=trace").is_ok());
    }

    #[test]
    fn test_try_init_twice() {
        let _ = try_init_logging();
        assert!(!try_init_logging());
    }
}
