//! Diagnostic logging with `tracing`.
//!
//! Logs go to stderr so they never mix with an answer on stdout. The filter
//! comes from `LANGASSIST_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LANGASSIST_LOG";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Maps the number of `-v` flags to a filter directive.
///
/// Each `-v` raises the level one step above `base`, up to `trace`.
pub fn level_for(verbosity: u8, base: &'static str) -> &'static str {
    let start = LEVELS.iter().position(|l| *l == base).unwrap_or(1);
    let index = (start + usize::from(verbosity)).min(LEVELS.len() - 1);
    LEVELS[index]
}

pub fn filter(verbosity: u8, base: &'static str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, base)))
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// `base` is the level used without `-v`: `warn` for interactive commands
/// and `info` for `serve`.
pub fn init(verbosity: u8, base: &'static str, no_color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity, base))
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(verbosity >= 2)
        .try_init();
}
