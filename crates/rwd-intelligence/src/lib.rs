// ABOUTME: Telemetry analysis algorithms for assembled running activities
// ABOUTME: Break-aware resampler, stop segmentation, pace conversion and power-source indexing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # RWD Intelligence
//!
//! Algorithms operating on activities and their [`TimeTable`](rwd_core::models::TimeTable)s.
//! Everything here is synchronous and CPU-bound; [`resample_all`] fans out over
//! independent tables with rayon.

pub use rwd_core::constants;
pub use rwd_core::errors;
pub use rwd_core::models;

/// Pace conversion from and to meters per second
pub mod pace;
/// Locating power channels of competing providers
pub mod power;
/// Break-aware uniform resampling
pub mod resample;
/// Stop-based segment splitting
pub mod segments;

pub use pace::{DistanceUnit, Pace};
pub use power::{PowerSource, PowerSources};
pub use resample::{resample, resample_all, ResampleConfig};
pub use segments::split_segments;
