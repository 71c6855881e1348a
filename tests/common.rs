// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides raw payload builders, an in-memory activity source and archive writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `run_with_data`
//!
//! Fixtures mirror the payload shapes of the activity service: summaries for
//! the listing endpoint and a descriptors x samples matrix for details.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use run_with_data::constants::providers::{RUN_POWER_MODEL_APP_ID, STRYD_ZONES_APP_ID};
use run_with_data::errors::{AppError, AppResult};
use run_with_data::models::{
    MetricDescriptor, RawActivityDetail, RawActivitySummary, RawActivityType,
};
use run_with_data::providers::ActivitySource;
use serde_json::{json, Value};

/// Epoch milliseconds of 2024-01-01T08:00:00Z
pub const BASE_MILLIS: i64 = 1_704_096_000_000;

/// Connect IQ descriptor key
pub const IQ_KEY: &str = "directIQDeveloperField";

/// App id that no registered provider uses
pub const UNKNOWN_APP_ID: &str = "11111111-2222-3333-4444-555555555555";

/// Summary of one activity starting at 09:00 local, 08:00 GMT
pub fn summary(activity_id: &str, type_key: &str) -> RawActivitySummary {
    RawActivitySummary {
        activity_id: activity_id.to_owned(),
        start_time_local: "2024-01-01 09:00:00".to_owned(),
        start_time_gmt: "2024-01-01 08:00:00".to_owned(),
        activity_name: Some(format!("Run {activity_id}")),
        calories: Some(512.0),
        activity_type: RawActivityType {
            type_key: type_key.to_owned(),
        },
    }
}

/// Running summaries `1..=count`
pub fn running_summaries(count: usize) -> Vec<RawActivitySummary> {
    (1..=count)
        .map(|id| summary(&id.to_string(), "running"))
        .collect()
}

/// Stryd developer field descriptor
pub fn stryd(number: u32) -> MetricDescriptor {
    MetricDescriptor::developer(IQ_KEY, STRYD_ZONES_APP_ID.to_string(), number)
}

/// RunPowerModel developer field descriptor
pub fn run_power_model(number: u32) -> MetricDescriptor {
    MetricDescriptor::developer(IQ_KEY, RUN_POWER_MODEL_APP_ID.to_string(), number)
}

/// Epoch milliseconds `offset_secs` after [`BASE_MILLIS`]
pub fn millis(offset_secs: i64) -> Value {
    json!(BASE_MILLIS + offset_secs * 1000)
}

/// Detail payload with timestamp, speed and the power of all three providers
///
/// Samples sit at the given second offsets; speed is 3.0 m/s and the three
/// power channels read 250, 260 and 270 W plus the row number.
pub fn power_detail(offsets: &[i64]) -> RawActivityDetail {
    let descriptors = vec![
        MetricDescriptor::native("directTimestamp"),
        MetricDescriptor::native("directSpeed"),
        MetricDescriptor::native("directPower"),
        stryd(0),
        run_power_model(0),
    ];
    let rows = offsets
        .iter()
        .enumerate()
        .map(|(row, &offset)| {
            let bump = row as f64;
            vec![
                millis(offset),
                json!(3.0),
                json!(250.0 + bump),
                json!(260.0 + bump),
                json!(270.0 + bump),
            ]
        })
        .collect();
    RawActivityDetail::new(descriptors, rows)
}

/// In-memory activity source recording every request
#[derive(Default)]
pub struct MockSource {
    pub summaries: Vec<RawActivitySummary>,
    pub details: HashMap<String, RawActivityDetail>,
    pub page_requests: Mutex<Vec<(usize, usize)>>,
    pub detail_requests: AtomicUsize,
}

impl MockSource {
    pub fn new(summaries: Vec<RawActivitySummary>) -> Self {
        Self {
            summaries,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_detail(mut self, activity_id: &str, detail: RawActivityDetail) -> Self {
        self.details.insert(activity_id.to_owned(), detail);
        self
    }

    pub fn page_requests(&self) -> Vec<(usize, usize)> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn detail_requests(&self) -> usize {
        self.detail_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivitySource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
    ) -> AppResult<Vec<RawActivitySummary>> {
        self.page_requests.lock().unwrap().push((start, limit));
        Ok(self
            .summaries
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_activity_details(&self, activity_id: &str) -> AppResult<RawActivityDetail> {
        self.detail_requests.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(activity_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("activity {activity_id}")))
    }
}

/// Write an archive directory readable by `LocalArchiveSource`
pub fn write_archive(
    root: &Path,
    summaries: &[RawActivitySummary],
    details: &[(&str, &RawActivityDetail)],
) {
    fs::write(
        root.join("activities.json"),
        serde_json::to_vec(summaries).unwrap(),
    )
    .unwrap();
    let details_dir = root.join("details");
    fs::create_dir_all(&details_dir).unwrap();
    for (activity_id, detail) in details {
        fs::write(
            details_dir.join(format!("{activity_id}.json")),
            serde_json::to_vec(detail).unwrap(),
        )
        .unwrap();
    }
}
