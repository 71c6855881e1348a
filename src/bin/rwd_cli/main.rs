// ABOUTME: rwd-cli - command-line front end for the running telemetry pipeline
// ABOUTME: Lists providers and runs, describes an activity, and exports resampled tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show the registered metric providers and their fields
//! rwd-cli providers --fields
//!
//! # List the runs of an exported archive
//! rwd-cli list --archive ./archive --limit 10
//!
//! # Describe one run: metrics, power sources and average pace
//! rwd-cli describe --archive ./archive 12345678901
//!
//! # Export the resampled table as CSV (or JSON)
//! rwd-cli resample --archive ./archive 12345678901 --step 1 --break-threshold 10
//! rwd-cli resample --archive ./archive 12345678901 --format json --segments
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use run_with_data::config::RwdConfig;
use run_with_data::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "rwd-cli",
    about = "Running telemetry normalization CLI",
    long_about = "Assembles Garmin running activities with Connect IQ power fields into uniform, break-aware resampled tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read activity details through the on-disk detail cache
    #[arg(long, global = true)]
    cache: bool,

    /// Cache directory override (implies --cache)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List the registered metric providers
    Providers {
        /// Also list every field of each provider
        #[arg(long)]
        fields: bool,
    },

    /// List the runs of an archive, most recent first
    List {
        /// Archive directory holding activities.json and details/
        #[arg(long)]
        archive: PathBuf,

        /// Maximum number of runs to list
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Describe one run
    Describe {
        /// Archive directory holding activities.json and details/
        #[arg(long)]
        archive: PathBuf,

        /// Activity id
        activity_id: String,
    },

    /// Export the resampled telemetry table of one run
    Resample {
        /// Archive directory holding activities.json and details/
        #[arg(long)]
        archive: PathBuf,

        /// Activity id
        activity_id: String,

        /// Grid step in seconds
        #[arg(long)]
        step: Option<i64>,

        /// Gaps longer than this many seconds are zero-filled breaks
        #[arg(long)]
        break_threshold: Option<i64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Split on stops and resample each moving segment separately
        #[arg(long)]
        segments: bool,
    },
}

/// Table output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a Timestamp column
    Csv,
    /// JSON object with index and columns
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = RwdConfig::from_env()?;
    if cli.cache_dir.is_some() {
        config.cache_dir.clone_from(&cli.cache_dir);
    }
    let use_cache = cli.cache || cli.cache_dir.is_some();
    debug!(use_cache, "rwd-cli starting");

    match cli.command {
        Command::Providers { fields } => commands::providers::list(fields),
        Command::List { archive, limit } => {
            if let Some(limit) = limit {
                config.stream = config.stream.with_max_activities(limit);
            }
            commands::activities::list(&archive, &config, use_cache).await?;
        }
        Command::Describe {
            archive,
            activity_id,
        } => {
            commands::activities::describe(&archive, &activity_id, &config, use_cache).await?;
        }
        Command::Resample {
            archive,
            activity_id,
            step,
            break_threshold,
            format,
            segments,
        } => {
            let options = commands::activities::ResampleOptions {
                step_secs: step,
                break_threshold_secs: break_threshold,
                format,
                segments,
            };
            commands::activities::resample(&archive, &activity_id, &config, use_cache, options)
                .await?;
        }
    }

    Ok(())
}
