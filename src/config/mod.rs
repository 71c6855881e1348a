// ABOUTME: Configuration module for the telemetry pipeline and the CLI
// ABOUTME: Environment-only settings for caching, paging and resampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: pipeline settings read from `RWD_*` variables
//! - **Error**: configuration error taxonomy

/// Pipeline configuration from environment variables
pub mod environment;
/// Configuration error types
pub mod error;

pub use environment::RwdConfig;
pub use error::ConfigError;
