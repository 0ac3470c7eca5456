//! CLI for pipemeter.

mod commands;
mod duration;
mod signal;

use anyhow::Result;
use clap::Parser;
use pipemeter_core::config::{self, UserDefaults};
use pipemeter_core::MeterConfig;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_get_size, run_meter};
use duration::parse_refresh;

pub use commands::Outcome;

/// Top-level CLI: `producer | pipemeter [OPTIONS] | consumer`.
#[derive(Debug, Parser)]
#[command(name = "pipemeter", disable_version_flag = true)]
#[command(
    about = "Copy stdin to stdout unchanged while showing transfer progress on stderr",
    long_about = None
)]
pub struct Cli {
    /// Expected total size in bytes; 0 or negative means unknown.
    #[arg(
        short = 's',
        long = "size",
        value_name = "BYTES",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub size: i64,

    /// Time between progress updates, e.g. 100ms, 1s, 1m30s.
    #[arg(short = 'r', long = "refresh", value_name = "DURATION", value_parser = parse_refresh)]
    pub refresh: Option<Duration>,

    /// Don't show the progress bar.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Width of the progress bar in characters.
    #[arg(short = 'w', long = "bar-size", value_name = "CELLS")]
    pub bar_size: Option<usize>,

    /// Print the size of FILE in bytes and exit.
    #[arg(long = "get-size", value_name = "FILE", conflicts_with_all = ["size", "quiet"])]
    pub get_size: Option<PathBuf>,

    /// Print version and exit.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

/// The `--version` output, e.g. `version: 0.1.0`.
pub fn version_line() -> String {
    format!("version: {}", env!("CARGO_PKG_VERSION"))
}

impl Cli {
    /// Build the engine config: flags over config file over built-in defaults.
    pub fn meter_config(&self, defaults: &UserDefaults) -> MeterConfig {
        let mut cfg = defaults.apply(MeterConfig::default());
        cfg.total_size = self.size;
        if let Some(refresh) = self.refresh {
            cfg.refresh_interval = refresh;
        }
        if self.quiet {
            cfg.quiet = true;
        }
        if let Some(width) = self.bar_size {
            cfg.bar_width = width;
        }
        cfg
    }

    pub async fn run_from_args() -> Result<Outcome> {
        let cli = Cli::parse();

        if cli.version {
            println!("{}", version_line());
            return Ok(Outcome::Completed);
        }

        if let Some(path) = &cli.get_size {
            run_get_size(path)?;
            return Ok(Outcome::Completed);
        }

        let defaults = config::load_user_defaults()?;
        let cfg = cli.meter_config(&defaults);
        tracing::debug!("resolved config: {:?}", cfg);
        run_meter(cfg).await
    }
}
