// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_config_path;

/// Command-line arguments for `dualcam`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dualcam",
    version,
    about = "Gated still/clip camera acquisition with per-cycle health logging.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Dualcam.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Run a single eligible capture cycle, then exit.
    ///
    /// Gate-low polls do not count as a cycle; the loop keeps polling until
    /// one capture has actually run.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DUALCAM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the capture commands that would run, but
    /// don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_the_resolved_default_path() {
        let args = CliArgs::parse_from(["dualcam"]);
        assert_eq!(args.config, default_config_path());
        assert_eq!(args.config, PathBuf::from("Dualcam.toml"));
    }

    #[test]
    fn explicit_config_path_overrides_the_default() {
        let args = CliArgs::parse_from(["dualcam", "--config", "/etc/dualcam.toml"]);
        assert_eq!(args.config, PathBuf::from("/etc/dualcam.toml"));
    }
}
