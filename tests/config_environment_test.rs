// ABOUTME: Unit tests for environment-driven pipeline configuration
// ABOUTME: Validates defaults, overrides, parse errors and range checks of RWD_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use chrono::TimeDelta;
use run_with_data::config::environment::{
    BREAK_THRESHOLD_VAR, CACHE_DIR_VAR, MAX_ACTIVITIES_VAR, PAGE_SIZE_VAR, RESAMPLE_STEP_VAR,
};
use run_with_data::config::{ConfigError, RwdConfig};
use run_with_data::errors::{AppError, ErrorCode};
use run_with_data::intelligence::ResampleConfig;
use run_with_data::logging::{LogFormat, LoggingConfig};
use run_with_data::providers::StreamConfig;
use serial_test::serial;

const ALL_VARS: [&str; 5] = [
    CACHE_DIR_VAR,
    RESAMPLE_STEP_VAR,
    BREAK_THRESHOLD_VAR,
    PAGE_SIZE_VAR,
    MAX_ACTIVITIES_VAR,
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();
    let config = RwdConfig::from_env().unwrap();
    assert_eq!(config, RwdConfig::default());
    assert_eq!(config.resample, ResampleConfig::default());
    assert_eq!(config.stream, StreamConfig::default());
    assert!(config.cache_dir.is_none());
}

#[test]
#[serial]
fn test_overrides() {
    clear_env();
    env::set_var(CACHE_DIR_VAR, "/tmp/rwd-cache");
    env::set_var(RESAMPLE_STEP_VAR, "5");
    env::set_var(BREAK_THRESHOLD_VAR, " 30 ");
    env::set_var(PAGE_SIZE_VAR, "50");
    env::set_var(MAX_ACTIVITIES_VAR, "12");

    let config = RwdConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/rwd-cache")));
    assert_eq!(config.resample.step, TimeDelta::seconds(5));
    assert_eq!(config.resample.break_threshold, TimeDelta::seconds(30));
    assert_eq!(config.stream.page_size, 50);
    assert_eq!(config.stream.max_activities, Some(12));
    assert_eq!(
        config.detail_cache().unwrap().dir(),
        PathBuf::from("/tmp/rwd-cache").as_path()
    );
}

#[test]
#[serial]
fn test_unparsable_value() {
    clear_env();
    env::set_var(RESAMPLE_STEP_VAR, "one");
    let result = RwdConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_out_of_range_values() {
    let cases = [
        (RESAMPLE_STEP_VAR, "0"),
        (BREAK_THRESHOLD_VAR, "-1"),
        (PAGE_SIZE_VAR, "0"),
        (PAGE_SIZE_VAR, "101"),
        (MAX_ACTIVITIES_VAR, "0"),
    ];
    for (key, value) in cases {
        clear_env();
        env::set_var(key, value);
        let result = RwdConfig::from_env();
        clear_env();
        assert!(
            matches!(result, Err(ConfigError::ValueOutOfRange(_))),
            "{key}={value} should be out of range"
        );
    }
}

#[test]
#[serial]
fn test_config_error_maps_to_app_error() {
    clear_env();
    env::set_var(PAGE_SIZE_VAR, "lots");
    let error = AppError::from(RwdConfig::from_env().unwrap_err());
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("SERVICE_NAME", "rwd-test");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("SERVICE_NAME");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.service_name, "rwd-test");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);
}
