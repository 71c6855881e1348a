// ABOUTME: Environment-based configuration for caching, activity paging and resampling
// ABOUTME: Parses RWD_* variables into typed settings with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use rwd_core::constants::limits::DEFAULT_PAGE_SIZE;
use rwd_core::constants::resample::{DEFAULT_BREAK_THRESHOLD_SECS, DEFAULT_STEP_SECS};
use rwd_core::errors::AppResult;
use rwd_intelligence::ResampleConfig;
use rwd_providers::{DetailCache, StreamConfig, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use tracing::debug;

use super::error::ConfigError;

/// Detail cache directory
pub const CACHE_DIR_VAR: &str = "RWD_CACHE_DIR";
/// Resampling grid step in whole seconds
pub const RESAMPLE_STEP_VAR: &str = "RWD_RESAMPLE_STEP_SECS";
/// Break threshold in whole seconds
pub const BREAK_THRESHOLD_VAR: &str = "RWD_BREAK_THRESHOLD_SECS";
/// Activity listing page size
pub const PAGE_SIZE_VAR: &str = "RWD_PAGE_SIZE";
/// Maximum number of runs listed
pub const MAX_ACTIVITIES_VAR: &str = "RWD_MAX_ACTIVITIES";

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RwdConfig {
    /// Detail cache directory, `None` for the user cache directory
    pub cache_dir: Option<PathBuf>,
    /// Resampling parameters
    pub resample: ResampleConfig,
    /// Activity paging parameters
    pub stream: StreamConfig,
}

impl RwdConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for a value that does not parse and
    /// `ConfigError::ValueOutOfRange` for one outside its accepted range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let step_secs: i64 = parse_var(RESAMPLE_STEP_VAR, DEFAULT_STEP_SECS)?;
        if step_secs < 1 {
            return Err(ConfigError::ValueOutOfRange(
                "RWD_RESAMPLE_STEP_SECS must be at least 1",
            ));
        }

        let break_threshold_secs: i64 =
            parse_var(BREAK_THRESHOLD_VAR, DEFAULT_BREAK_THRESHOLD_SECS)?;
        if break_threshold_secs < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "RWD_BREAK_THRESHOLD_SECS must not be negative",
            ));
        }

        let resample = ResampleConfig::from_secs(step_secs, break_threshold_secs).map_err(|_| {
            ConfigError::ValueOutOfRange("resampling durations exceed the supported range")
        })?;

        let page_size: usize = parse_var(PAGE_SIZE_VAR, DEFAULT_PAGE_SIZE)?;
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::ValueOutOfRange(
                "RWD_PAGE_SIZE must be between 1 and 100",
            ));
        }

        let mut stream = StreamConfig::with_page_size(page_size);
        if let Some(max) = parse_optional_var::<usize>(MAX_ACTIVITIES_VAR)? {
            if max == 0 {
                return Err(ConfigError::ValueOutOfRange(
                    "RWD_MAX_ACTIVITIES must be at least 1",
                ));
            }
            stream = stream.with_max_activities(max);
        }

        let cache_dir = env::var(CACHE_DIR_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            cache_dir,
            resample,
            stream,
        };
        debug!(?config, "Loaded configuration from environment");
        Ok(config)
    }

    /// Detail cache at the configured directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no directory is configured and the
    /// platform has no user cache directory.
    pub fn detail_cache(&self) -> AppResult<DetailCache> {
        self.cache_dir
            .as_ref()
            .map_or_else(DetailCache::in_user_cache_dir, |dir| {
                Ok(DetailCache::new(dir))
            })
    }

    /// Same configuration with different resampling parameters
    #[must_use]
    pub fn with_resample(mut self, resample: ResampleConfig) -> Self {
        self.resample = resample;
        self
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + ToString,
{
    let raw = env_var_or(key, &default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{key}={raw:?} is not a valid number")))
}

fn parse_optional_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("{key}={raw:?} is not a valid number"))),
        _ => Ok(None),
    }
}
