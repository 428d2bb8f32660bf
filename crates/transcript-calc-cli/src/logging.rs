//! Log subscriber setup

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "TCALC_LOG";

/// Where the output is going; the terminal UI owns the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Line output, logs go to stderr at the requested level
    Lines,
    /// Alternate screen, only errors unless `TCALC_LOG` says otherwise
    Screen,
}

/// Filter directive for a verbosity and target, ignoring the environment
#[must_use]
pub const fn default_directive(verbosity: Verbosity, target: LogTarget) -> &'static str {
    match target {
        LogTarget::Lines => verbosity.filter_directive(),
        LogTarget::Screen => "error",
    }
}

/// Build the filter: `TCALC_LOG` if set, otherwise derived from the flags
pub fn build_filter(
    env_value: Option<&str>,
    verbosity: Verbosity,
    target: LogTarget,
) -> CliResult<EnvFilter> {
    match env_value {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .map_err(|e| CliError::config(format!("invalid {LOG_ENV} value: {e}"))),
        _ => Ok(EnvFilter::new(default_directive(verbosity, target))),
    }
}

/// Install the global subscriber writing to stderr
pub fn init(verbosity: Verbosity, target: LogTarget) -> CliResult<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env_value.as_deref(), verbosity, target)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| CliError::config(format!("logging already initialised: {e}")))
}
