//! Logging initialization.
//!
//! Human-readable `tracing` output on stderr. `MKDOWN_LOG` (EnvFilter
//! syntax) takes precedence over the `--verbose` count.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MKDOWN_LOG";

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let use_ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(use_ansi)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(u8::MAX), "trace");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(0);
        init_logging(3);
    }
}
