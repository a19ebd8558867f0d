// src/logging.rs

//! `tracing` subscriber for the `pmsim` binary.
//!
//! The filter comes from the `--log-level` flag when given. Otherwise
//! `PMSIM_LOG` is read as a full `EnvFilter` directive string, so both
//! `debug` and `pmsim::controller=trace,info` work. Anything missing or
//! unparsable falls back to `info`.
//!
//! Output goes to stderr; stdout is reserved for dashboard frames and
//! report tables.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "PMSIM_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = EnvFilter::try_new(directives(cli_level, env.as_deref()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Directive string for the subscriber's `EnvFilter`.
fn directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level_name(level).to_string();
    }

    match env.map(str::trim) {
        Some(raw) if !raw.is_empty() && EnvFilter::try_new(raw).is_ok() => raw.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
