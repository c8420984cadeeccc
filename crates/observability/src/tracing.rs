//! Tracing/logging initialization.
//!
//! Logs go to stderr so that stdout stays free for machine-readable output.

use tracing_subscriber::EnvFilter;

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

/// JSON logs at `info` unless `RUST_LOG` says otherwise.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with("info", LogFormat::Json);
}

/// Install the global subscriber with a fallback filter directive.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false` when
/// a subscriber was already installed.
pub fn init_with(default_directive: &str, format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Compact => builder.compact().try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init();
        assert!(!init_with("debug", LogFormat::Compact));
    }
}
