// ABOUTME: Collaborator traits for fetching raw activities and looking up elevations
// ABOUTME: Implemented by remote clients, the local archive and the caching wrapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use rwd_core::errors::{AppError, AppResult};
use rwd_core::models::{RawActivityDetail, RawActivitySummary};

/// Source of raw activity summaries and detail payloads
///
/// # Implementing
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use rwd_core::errors::AppResult;
/// use rwd_core::models::{RawActivityDetail, RawActivitySummary};
/// use rwd_providers::ActivitySource;
///
/// struct EmptySource;
///
/// #[async_trait]
/// impl ActivitySource for EmptySource {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     async fn fetch_activities(
///         &self,
///         _start: usize,
///         _limit: usize,
///     ) -> AppResult<Vec<RawActivitySummary>> {
///         Ok(Vec::new())
///     }
///
///     async fn fetch_activity_details(&self, activity_id: &str) -> AppResult<RawActivityDetail> {
///         Err(rwd_core::errors::AppError::not_found(format!("activity {activity_id}")))
///     }
/// }
/// ```
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` summaries starting at offset `start`, newest first
    ///
    /// A page shorter than `limit` means the listing is exhausted.
    async fn fetch_activities(&self, start: usize, limit: usize)
        -> AppResult<Vec<RawActivitySummary>>;

    /// Fetch the detail payload of one activity
    async fn fetch_activity_details(&self, activity_id: &str) -> AppResult<RawActivityDetail>;
}

/// Elevation lookup for `(latitude, longitude)` pairs
#[async_trait]
pub trait ElevationLookup: Send + Sync {
    /// Elevation in meters for every coordinate, in input order
    async fn elevations(&self, coordinates: &[(f64, f64)]) -> AppResult<Vec<f64>>;
}

/// Reject activity ids that could escape a storage directory
pub(crate) fn validate_activity_id(activity_id: &str) -> AppResult<()> {
    let valid = !activity_id.is_empty()
        && activity_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "invalid activity id '{activity_id}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_id_validation() {
        assert!(validate_activity_id("17234567890").is_ok());
        assert!(validate_activity_id("run_2024-01-01").is_ok());
        assert!(validate_activity_id("").is_err());
        assert!(validate_activity_id("../etc/passwd").is_err());
        assert!(validate_activity_id("a/b").is_err());
    }
}
