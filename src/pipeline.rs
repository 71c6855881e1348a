// ABOUTME: End-to-end telemetry pipeline from an activity source to resampled tables
// ABOUTME: Lists runs, assembles details through the metric registry, and resamples the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity pipeline
//!
//! Glue between an [`ActivitySource`] and the analysis crates. One pipeline
//! owns a source, a shared [`MetricRegistry`] and the paging and resampling
//! parameters:
//!
//! ```rust,no_run
//! use run_with_data::pipeline::ActivityPipeline;
//! use run_with_data::config::RwdConfig;
//! use rwd_providers::{global_registry, LocalArchiveSource};
//!
//! # async fn demo() -> rwd_core::errors::AppResult<()> {
//! let pipeline = ActivityPipeline::from_config(
//!     LocalArchiveSource::new("./archive"),
//!     global_registry(),
//!     &RwdConfig::default(),
//! );
//! let (activity, table) = pipeline.load_resampled("12345").await?;
//! println!("{} rows for {}", table.len(), activity.activity_id());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use futures_util::TryStreamExt;
use rwd_core::errors::{AppError, AppResult};
use rwd_core::models::{Activity, TimeTable};
use rwd_intelligence::{resample, split_segments, ResampleConfig};
use rwd_providers::{
    collect_runs, run_activity_stream, ActivitySource, CachingActivitySource, DetailCache,
    MetricRegistry, RunStream, StreamConfig,
};
use tracing::debug;

use crate::config::RwdConfig;
use crate::logging::AppLogger;

/// Activity source plus the parameters needed to turn its payloads into tables
pub struct ActivityPipeline<S> {
    source: S,
    registry: Arc<MetricRegistry>,
    resample: ResampleConfig,
    stream: StreamConfig,
}

impl<S: ActivitySource> ActivityPipeline<S> {
    /// Pipeline with default paging and resampling
    #[must_use]
    pub fn new(source: S, registry: Arc<MetricRegistry>) -> Self {
        Self {
            source,
            registry,
            resample: ResampleConfig::default(),
            stream: StreamConfig::default(),
        }
    }

    /// Pipeline using the paging and resampling parameters of `config`
    #[must_use]
    pub fn from_config(source: S, registry: Arc<MetricRegistry>, config: &RwdConfig) -> Self {
        Self {
            source,
            registry,
            resample: config.resample,
            stream: config.stream,
        }
    }

    /// Same pipeline with different resampling parameters
    #[must_use]
    pub fn with_resample_config(mut self, resample: ResampleConfig) -> Self {
        self.resample = resample;
        self
    }

    /// Same pipeline with different paging parameters
    #[must_use]
    pub fn with_stream_config(mut self, stream: StreamConfig) -> Self {
        self.stream = stream;
        self
    }

    /// Wrap the source so detail payloads are read through `cache`
    #[must_use]
    pub fn with_cache(self, cache: DetailCache) -> ActivityPipeline<CachingActivitySource<S>> {
        ActivityPipeline {
            source: CachingActivitySource::new(self.source, cache),
            registry: self.registry,
            resample: self.resample,
            stream: self.stream,
        }
    }

    /// Underlying source
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Registry used to resolve detail descriptors
    #[must_use]
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Resampling parameters
    #[must_use]
    pub const fn resample_config(&self) -> ResampleConfig {
        self.resample
    }

    /// Lazily paged stream of runs
    pub fn runs(&self) -> RunStream<'_> {
        run_activity_stream(&self.source, self.stream)
    }

    /// Every run the source lists, most recent first
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the source.
    pub async fn list_runs(&self) -> AppResult<Vec<Activity>> {
        collect_runs(&self.source, self.stream).await
    }

    /// Find one run by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the listing has no run with that id, or
    /// the first error raised by the source.
    pub async fn find_run(&self, activity_id: &str) -> AppResult<Activity> {
        let mut runs = self.runs();
        while let Some(activity) = runs.try_next().await? {
            if activity.activity_id() == activity_id {
                return Ok(activity);
            }
        }
        Err(AppError::not_found(format!("Run {activity_id}")))
    }

    /// Fetch and assemble the detail samples of a run
    ///
    /// # Errors
    ///
    /// Returns the source error if the fetch fails, or a lookup error if the
    /// payload's rows do not match its descriptors.
    pub async fn load_details(&self, activity: &mut Activity) -> AppResult<()> {
        let started = Instant::now();
        let fetched = self
            .source
            .fetch_activity_details(activity.activity_id())
            .await;
        AppLogger::log_source_request(
            self.source.name(),
            "fetch_activity_details",
            fetched.is_ok(),
            elapsed_ms(started),
        );

        activity.load_details(&fetched?, self.registry.as_ref())?;

        let slots = activity.metrics().unwrap_or_default();
        let resolved = slots.iter().filter(|slot| slot.is_resolved()).count();
        AppLogger::log_activity_loaded(
            activity.activity_id(),
            resolved,
            slots.len() - resolved,
            elapsed_ms(started),
        );
        Ok(())
    }

    /// Find a run by id and load its details
    ///
    /// # Errors
    ///
    /// See [`Self::find_run`] and [`Self::load_details`].
    pub async fn load_activity(&self, activity_id: &str) -> AppResult<Activity> {
        let mut activity = self.find_run(activity_id).await?;
        self.load_details(&mut activity).await?;
        Ok(activity)
    }

    /// Resampled table of a loaded activity
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the activity has no details or no timestamp
    /// metric, or a validation error if its timestamps are unusable.
    pub fn resampled_table(&self, activity: &Activity) -> AppResult<TimeTable> {
        let table = activity.to_table()?;
        let resampled = resample(&table, &self.resample)?;
        debug!(
            activity.id = %activity.activity_id(),
            rows_in = table.len(),
            rows_out = resampled.len(),
            "Built resampled table"
        );
        Ok(resampled)
    }

    /// Moving segments of a loaded activity, each resampled on its own
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the activity has no details, no timestamp or
    /// no speed metric.
    pub fn resampled_segments(&self, activity: &Activity) -> AppResult<Vec<TimeTable>> {
        let table = activity.to_table()?;
        split_segments(&table)?
            .iter()
            .map(|segment| resample(segment, &self.resample).map_err(AppError::from))
            .collect()
    }

    /// Find, load and resample a run in one call
    ///
    /// # Errors
    ///
    /// See [`Self::load_activity`] and [`Self::resampled_table`].
    pub async fn load_resampled(&self, activity_id: &str) -> AppResult<(Activity, TimeTable)> {
        let activity = self.load_activity(activity_id).await?;
        let table = self.resampled_table(&activity)?;
        Ok((activity, table))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
