// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ConfigForm;

/// Command-line arguments for `pmsim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pmsim",
    version,
    about = "Toy project-management simulation with earned-value metrics.",
    long_about = None
)]
pub struct CliArgs {
    /// Path of the key/value file shared between subcommands.
    ///
    /// Default: `.pmsim/session.toml` in the current working directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PMSIM_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Save the session parameters for the dashboard and the report.
    Configure(ConfigureArgs),
    /// Run the live step simulation.
    Dashboard(DashboardArgs),
    /// Print the summary report over N synthetic runs.
    Report(ReportArgs),
}

/// All four values are required; they are optional here so that a missing
/// one is reported by name instead of by clap.
#[derive(Debug, Clone, Args)]
pub struct ConfigureArgs {
    /// Number of runs summarised by the report.
    #[arg(long, value_name = "N")]
    pub num_simulations: Option<String>,

    /// Error margin in percent.
    #[arg(long, value_name = "PERCENT")]
    pub error_margin: Option<String>,

    /// Step limit for a dashboard run.
    #[arg(long, value_name = "STEPS")]
    pub max_steps: Option<String>,

    /// Display name of the plan being simulated.
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,
}

impl ConfigureArgs {
    pub fn to_form(&self) -> ConfigForm {
        ConfigForm {
            num_simulations: self.num_simulations.clone(),
            error_margin: self.error_margin.clone(),
            max_steps: self.max_steps.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    /// Scenario file (TOML). The built-in demo plan is used when omitted.
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Timer speed, 1 (slow) to 10 (fast).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub speed: u8,

    /// Seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start immediately and exit once the run finishes.
    #[arg(long)]
    pub auto: bool,

    /// Print the plan and parameters, but don't simulate.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Seed for reproducible rows.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Request a CSV download (placeholder only).
    #[arg(long)]
    pub csv: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
