//! Subscriber setup for the crate's `tracing` events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stderr subscriber for the refresh and cache log events.
///
/// `RUST_LOG` overrides `default_filter`. Returns `false` if a global
/// subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        init_logging("debug");
        assert!(!init_logging("info"));
    }
}
