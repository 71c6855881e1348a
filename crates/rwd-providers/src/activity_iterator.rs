// ABOUTME: Streaming iterator over running activities from a paginated activity source
// ABOUTME: Filters running/treadmill summaries and assembles Activity values page by page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Streaming Run Iterator
//!
//! Activity listings are paginated by offset. Instead of loading every summary
//! into a `Vec`, the stream fetches one page at a time, keeps only running
//! activities and yields them as assembled [`Activity`] values.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use rwd_providers::{ActivitySource, RunStreamExt, StreamConfig};
//!
//! async fn print_runs(source: &dyn ActivitySource) {
//!     let mut stream = source.runs_stream(StreamConfig::default().with_max_activities(10));
//!     while let Some(result) = stream.next().await {
//!         match result {
//!             Ok(activity) => println!("{} {}", activity.activity_id(), activity.timezone()),
//!             Err(e) => eprintln!("Error: {e}"),
//!         }
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;

use async_stream::try_stream;
use futures_util::{Stream, TryStreamExt};
use rwd_core::constants::activity_types::RUN_TYPES;
use rwd_core::constants::limits::DEFAULT_PAGE_SIZE;
use rwd_core::errors::{AppError, AppResult};
use rwd_core::models::Activity;
use tracing::{debug, warn};

use crate::source::ActivitySource;

/// Minimum page size
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum page size accepted by the activity listing
pub const MAX_PAGE_SIZE: usize = 100;

/// Configuration for run streaming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Number of summaries requested per page
    pub page_size: usize,
    /// Maximum number of runs to yield (None for unlimited)
    pub max_activities: Option<usize>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_activities: None,
        }
    }
}

impl StreamConfig {
    /// Create configuration with specified page size
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
            max_activities: None,
        }
    }

    /// Set maximum number of runs to yield
    #[must_use]
    pub const fn with_max_activities(mut self, max: usize) -> Self {
        self.max_activities = Some(max);
        self
    }
}

/// Stream of assembled running activities
pub type RunStream<'a> = Pin<Box<dyn Stream<Item = Result<Activity, AppError>> + Send + 'a>>;

/// Create a lazily paged stream of running activities
///
/// Pages are requested at increasing offsets until a page comes back shorter
/// than `page_size` or `max_activities` runs have been yielded. Summaries of other
/// sports are skipped, as are summaries whose start times cannot be parsed.
pub fn run_activity_stream<S>(source: &S, config: StreamConfig) -> RunStream<'_>
where
    S: ActivitySource + ?Sized,
{
    let page_size = config.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
    let max_activities = config.max_activities;

    Box::pin(try_stream! {
        let mut buffer: VecDeque<Activity> = VecDeque::new();
        let mut start: usize = 0;
        let mut yielded_count: usize = 0;
        let mut exhausted = false;

        loop {
            if let Some(max) = max_activities {
                if yielded_count >= max {
                    break;
                }
            }

            if let Some(activity) = buffer.pop_front() {
                yielded_count += 1;
                yield activity;
                continue;
            }

            if exhausted {
                break;
            }

            let page = source.fetch_activities(start, page_size).await?;
            debug!(
                source = source.name(),
                start,
                fetched = page.len(),
                "Fetched activity page"
            );

            exhausted = page.len() < page_size;
            start += page.len();

            for summary in page
                .iter()
                .filter(|summary| RUN_TYPES.contains(&summary.activity_type.type_key.as_str()))
            {
                match Activity::from_raw_activity(summary) {
                    Ok(activity) => buffer.push_back(activity),
                    Err(error) => warn!(
                        activity.id = %summary.activity_id,
                        error = %error,
                        "Skipping activity with invalid summary"
                    ),
                }
            }
        }
    })
}

/// Collect a run stream into a vector
///
/// # Errors
///
/// Returns the first error raised by the source.
pub async fn collect_runs<S>(source: &S, config: StreamConfig) -> AppResult<Vec<Activity>>
where
    S: ActivitySource + ?Sized,
{
    run_activity_stream(source, config).try_collect().await
}

/// Extension trait for streaming runs from any activity source
pub trait RunStreamExt {
    /// Stream running activities with the given configuration
    fn runs_stream(&self, config: StreamConfig) -> RunStream<'_>;

    /// Stream at most `max_activities` running activities with the default page size
    fn recent_runs(&self, max_activities: usize) -> RunStream<'_> {
        self.runs_stream(StreamConfig::default().with_max_activities(max_activities))
    }
}

impl<T: ActivitySource + ?Sized> RunStreamExt for T {
    fn runs_stream(&self, config: StreamConfig) -> RunStream<'_> {
        run_activity_stream(self, config)
    }
}
