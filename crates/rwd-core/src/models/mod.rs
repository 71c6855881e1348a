// ABOUTME: Core data models for running telemetry normalization
// ABOUTME: Re-exports Metric, Activity, raw payload shapes and the TimeTable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Metric`: one named telemetry channel and its value series
//! - `Activity`: a running activity with positional metric slots
//! - `RawActivitySummary` / `RawActivityDetail`: payloads from the activity service
//! - `TimeTable`: timestamp-indexed numeric table consumed by the resampler

mod activity;
mod metric;
mod raw;
mod table;

pub use activity::{derive_timezone, Activity, MetricResolver, MetricSlot};
pub use metric::{IntoMetricSeries, Metric, MetricKey};
pub use raw::{
    DetailSample, MetricDescriptor, RawActivityDetail, RawActivitySummary, RawActivityType,
};
pub use table::{Column, TimeTable};
