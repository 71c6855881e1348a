// ABOUTME: Core types and constants for the run_with_data telemetry workspace
// ABOUTME: Foundation crate with error handling, metric/activity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # RWD Core
//!
//! Foundation crate providing shared types and constants for running-telemetry
//! normalization. Provider catalogs and the resampler live in sibling crates and
//! depend on the types defined here.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` for application boundaries and the
//!   `TelemetryError` taxonomy raised by the models
//! - **constants**: provider app ids, field keys, activity type keys and defaults
//! - **models**: `Metric`, `Activity`, raw payload shapes and the `TimeTable`

/// Unified error handling with `AppError`, `ErrorCode` and `TelemetryError`
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Telemetry data models (Metric, Activity, raw payloads, TimeTable)
pub mod models;
