//! Logging setup for flightdesk.
//!
//! Logs go to stderr so the board and command replies on stdout stay
//! clean when a session is piped or scripted. What shows up per level:
//!
//! - `error`: only with `-q`, which hides everything else.
//! - `warn`: script lines skipped as bad input.
//! - `info` (default): one line when a session starts and one when it ends,
//!   with the number of flights left on the board.
//! - `debug` (`-v`): every command applied, and every add, delete, status
//!   change or rejected submit in the registry.
//! - `trace` (`-vv`): every draft field edit.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much of the session the log shows, picked by `-q` / `-v` / `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Session start and end, plus skipped input.
    #[default]
    Normal,
    /// Adds each command and registry change.
    Verbose,
    /// Adds each draft field edit.
    Trace,
}

impl Verbosity {
    /// The most detailed level shown.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr logger for the `flightdesk` target.
///
/// Call once at startup; later calls are ignored. A `RUST_LOG` value
/// replaces the filter built from `verbosity`, e.g.
/// `RUST_LOG=flightdesk::registry=debug` to see only registry changes.
///
/// # Examples
///
/// ```no_run
/// use flightdesk::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    // Already-installed subscriber is fine
    let _ = subscriber.try_init();
}

fn default_filter(verbosity: Verbosity) -> String {
    format!("flightdesk={}", verbosity.to_level_filter())
}

/// Quiet logger for unit tests: warnings only, captured per test.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level_filter(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level_filter(), Level::INFO);
        assert_eq!(Verbosity::Verbose.to_level_filter(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level_filter(), Level::TRACE);
    }

    #[test]
    fn test_default_filter_scoped_to_crate() {
        assert_eq!(default_filter(Verbosity::Normal), "flightdesk=INFO");
        assert_eq!(default_filter(Verbosity::Verbose), "flightdesk=DEBUG");
        assert_eq!(default_filter(Verbosity::Trace), "flightdesk=TRACE");
        assert_eq!(default_filter(Verbosity::Quiet), "flightdesk=ERROR");
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_init_logging_with_all_verbosity_levels() {
        // Only the first call installs a subscriber
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Verbose);
        init_logging(Verbosity::Trace);
    }

    #[test]
    fn test_init_test_logging_does_not_panic() {
        init_test_logging();
    }
}
