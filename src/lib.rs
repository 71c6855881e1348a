// ABOUTME: Main library entry point for run_with_data running telemetry normalization
// ABOUTME: Wires activity sources, the metric registry and the resampler into one pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Run With Data
//!
//! Normalizes Garmin running activities whose metrics come from the watch
//! itself and from Connect IQ apps (Stryd, RunPowerModel) into uniform
//! telemetry tables that can be compared side by side.
//!
//! ## Architecture
//!
//! - **rwd-core**: errors, constants and the `Metric` / `Activity` / `TimeTable` models
//! - **rwd-providers**: provider catalogs, the metric registry and activity sources
//! - **rwd-intelligence**: resampler, stop segmentation, pace and power-source helpers
//! - **this crate**: configuration, logging and the [`pipeline::ActivityPipeline`]
//!   used by the `rwd-cli` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use run_with_data::config::RwdConfig;
//! use run_with_data::pipeline::ActivityPipeline;
//! use rwd_providers::{global_registry, LocalArchiveSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RwdConfig::from_env()?;
//!     let pipeline =
//!         ActivityPipeline::from_config(LocalArchiveSource::new("archive"), global_registry(), &config);
//!
//!     for run in pipeline.list_runs().await? {
//!         println!("{} {}", run.activity_id(), run.start_time());
//!     }
//!     Ok(())
//! }
//! ```

// Re-export workspace crates so consumers depend on one crate
pub use rwd_core::{constants, errors, models};
pub use rwd_intelligence as intelligence;
pub use rwd_providers as providers;

/// Environment-driven configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// End-to-end activity pipeline
pub mod pipeline;
