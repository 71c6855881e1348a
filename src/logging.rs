// ABOUTME: Logging configuration and structured logging setup for the telemetry pipeline
// ABOUTME: Configures log levels and formatters, writing to stderr so stdout stays free for data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use std::env;
use std::io;

use anyhow::Result;
use rwd_core::constants::service_names;
use serde_json::json;
use tracing::{debug, info, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for machine consumption
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format, the default for the CLI
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, falling back to compact output
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            service_name: service_names::RUN_WITH_DATA.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: env::var("LOG_FORMAT")
                .map_or(LogFormat::Compact, |name| LogFormat::from_name(&name)),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::RUN_WITH_DATA.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
        }
    }

    /// Same configuration with a different level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Build the filter for this configuration
    ///
    /// `RUST_LOG` wins over the configured level when set.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        env::var("RUST_LOG")
            .map_or_else(
                |_| EnvFilter::new(&self.level),
                |directive| EnvFilter::new(&directive),
            )
            .add_directive(
                format!("run_with_data={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| Level::INFO.into()),
            )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(self.fmt_layer(io::stderr))
            .try_init()?;

        self.log_startup_info();
        Ok(())
    }

    /// Formatting layer for the configured format
    ///
    /// Location and thread fields apply to every format.
    fn fmt_layer<S, W>(&self, writer: W) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + 'static,
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_writer(writer);

        match self.format {
            LogFormat::Json => layer.with_target(true).json().boxed(),
            LogFormat::Pretty => layer.with_target(true).boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                }
            }
        });

        debug!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            "Logging configured: {config_summary}"
        );
    }
}

/// Pipeline event logging with consistent field names
pub struct AppLogger;

impl AppLogger {
    /// Log the outcome of assembling one activity
    pub fn log_activity_loaded(
        activity_id: &str,
        resolved: usize,
        unresolved: usize,
        duration_ms: u64,
    ) {
        info!(
            activity.id = %activity_id,
            metrics.resolved = resolved,
            metrics.unresolved = unresolved,
            duration_ms = duration_ms,
            "Activity details loaded"
        );
    }

    /// Log one call to an external collaborator
    pub fn log_source_request(source: &str, operation: &str, success: bool, duration_ms: u64) {
        info!(
            source.name = %source,
            source.operation = %operation,
            source.success = success,
            duration_ms = duration_ms,
            "Source request"
        );
    }
}
