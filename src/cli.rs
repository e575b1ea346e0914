// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `directus-supervisor`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "directus-supervisor",
    version,
    about = "Resolve Directus launch configuration from PM2_* environment variables and hand it to PM2.",
    long_about = None
)]
pub struct CliArgs {
    /// Resolve and print the spec, but don't start anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the PM2 ecosystem JSON to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub emit: Option<String>,

    /// PM2 binary to invoke.
    #[arg(long, value_name = "BIN", default_value = "pm2")]
    pub pm2_bin: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DIRECTUS_SUPERVISOR_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
