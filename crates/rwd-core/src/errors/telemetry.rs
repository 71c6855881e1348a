// ABOUTME: Telemetry error taxonomy raised while building metrics, activities and tables
// ABOUTME: Validation, conversion, lookup and unknown-provider failures with structured context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Telemetry Error Types
//!
//! Errors raised by the metric models, the provider registry and the resampler.
//! Per-field failures (`UnknownProvider`, single-column `Conversion`) are usually
//! swallowed by the activity assembler into an unresolved slot; structural
//! failures (`Validation`, `Lookup`) are surfaced to the caller.

use thiserror::Error;

/// Errors produced while normalizing activity telemetry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    /// Malformed identity or configuration (e.g. a metric with no key)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value series contained an element that is not numeric
    #[error("Conversion error at index {index}: {reason}")]
    Conversion {
        /// Position of the offending element
        index: usize,
        /// What was found instead of a number
        reason: String,
    },

    /// Structural mismatch or missing required entry
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Third-party field whose app id matches no registered provider
    #[error("Unknown provider app id: {app_id}")]
    UnknownProvider {
        /// App id as it appeared in the descriptor
        app_id: String,
    },
}

impl TelemetryError {
    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a conversion error for the element at `index`
    #[must_use]
    pub fn conversion(index: usize, reason: impl Into<String>) -> Self {
        Self::Conversion {
            index,
            reason: reason.into(),
        }
    }

    /// Create a lookup error
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    /// Create an unknown-provider error
    #[must_use]
    pub fn unknown_provider(app_id: impl Into<String>) -> Self {
        Self::UnknownProvider {
            app_id: app_id.into(),
        }
    }

    /// Whether this error only affects a single field and may be skipped
    #[must_use]
    pub const fn is_field_local(&self) -> bool {
        matches!(self, Self::UnknownProvider { .. } | Self::Conversion { .. })
    }
}

/// Result alias for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;
