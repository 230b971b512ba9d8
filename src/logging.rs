//! Log subscriber setup
//!
//! `RUST_LOG` takes precedence, then the verbosity flags, then the configured
//! level. Logs go to stderr so stdout stays clean for results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pick the effective filter directive
pub fn filter_directive(flag_level: Option<&str>, config_level: &str) -> String {
    flag_level.unwrap_or(config_level).to_ascii_lowercase()
}

/// Install the global subscriber; later calls are no-ops
pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config() {
        assert_eq!(filter_directive(Some("debug"), "warn"), "debug");
    }

    #[test]
    fn test_config_used_without_flag() {
        assert_eq!(filter_directive(None, "INFO"), "info");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init("warn");
        init("debug");
    }
}
