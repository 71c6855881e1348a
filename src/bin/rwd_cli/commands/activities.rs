// ABOUTME: Activity commands for rwd-cli reading from a local archive directory
// ABOUTME: Lists runs, describes one run, and exports its resampled telemetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use run_with_data::config::RwdConfig;
use run_with_data::intelligence::{PowerSources, ResampleConfig};
use run_with_data::pipeline::ActivityPipeline;
use run_with_data::providers::{global_registry, ActivitySource, LocalArchiveSource};

use crate::helpers::display::{
    display_activity, display_run_list, print_table, print_tables,
};
use crate::OutputFormat;

/// Resample command options
pub struct ResampleOptions {
    pub step_secs: Option<i64>,
    pub break_threshold_secs: Option<i64>,
    pub format: OutputFormat,
    pub segments: bool,
}

/// List the runs of an archive
pub async fn list(archive: &Path, config: &RwdConfig, use_cache: bool) -> Result<()> {
    let source = LocalArchiveSource::new(archive);
    if use_cache {
        let pipeline = pipeline(source, config).with_cache(config.detail_cache()?);
        display_run_list(&pipeline.list_runs().await?);
    } else {
        display_run_list(&pipeline(source, config).list_runs().await?);
    }
    Ok(())
}

/// Describe one run: summary, metrics, power sources and average pace
pub async fn describe(
    archive: &Path,
    activity_id: &str,
    config: &RwdConfig,
    use_cache: bool,
) -> Result<()> {
    let source = LocalArchiveSource::new(archive);
    if use_cache {
        let pipeline = pipeline(source, config).with_cache(config.detail_cache()?);
        describe_with(&pipeline, activity_id).await
    } else {
        describe_with(&pipeline(source, config), activity_id).await
    }
}

/// Export the resampled table (or per-segment tables) of one run
pub async fn resample(
    archive: &Path,
    activity_id: &str,
    config: &RwdConfig,
    use_cache: bool,
    options: ResampleOptions,
) -> Result<()> {
    let defaults = config.resample;
    let resample_config = ResampleConfig::from_secs(
        options
            .step_secs
            .unwrap_or_else(|| defaults.step.num_seconds()),
        options
            .break_threshold_secs
            .unwrap_or_else(|| defaults.break_threshold.num_seconds()),
    )?;
    let config = config.clone().with_resample(resample_config);

    let source = LocalArchiveSource::new(archive);
    if use_cache {
        let pipeline = pipeline(source, &config).with_cache(config.detail_cache()?);
        resample_with(&pipeline, activity_id, &options).await
    } else {
        resample_with(&pipeline(source, &config), activity_id, &options).await
    }
}

fn pipeline(source: LocalArchiveSource, config: &RwdConfig) -> ActivityPipeline<LocalArchiveSource> {
    ActivityPipeline::from_config(source, global_registry(), config)
}

async fn describe_with<S: ActivitySource>(
    pipeline: &ActivityPipeline<S>,
    activity_id: &str,
) -> Result<()> {
    let activity = pipeline.load_activity(activity_id).await?;
    display_activity(&activity, &PowerSources::locate(&activity));
    Ok(())
}

async fn resample_with<S: ActivitySource>(
    pipeline: &ActivityPipeline<S>,
    activity_id: &str,
    options: &ResampleOptions,
) -> Result<()> {
    let activity = pipeline.load_activity(activity_id).await?;
    if options.segments {
        print_tables(&pipeline.resampled_segments(&activity)?, options.format)?;
    } else {
        print_table(&pipeline.resampled_table(&activity)?, options.format)?;
    }
    Ok(())
}
