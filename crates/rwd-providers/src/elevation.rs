// ABOUTME: Batched elevation lookups for activity GPS tracks
// ABOUTME: Splits coordinates into collaborator-sized batches and extracts coordinates from activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rwd_core::constants::limits::MAX_ELEVATION_BATCH;
use rwd_core::constants::metric_names::{LATITUDE, LONGITUDE};
use rwd_core::errors::{AppError, AppResult, TelemetryError, TelemetryResult};
use rwd_core::models::{Activity, Metric};
use tracing::debug;

use crate::source::ElevationLookup;

/// Look up elevations in batches of at most `batch_size` coordinates
///
/// `batch_size` is clamped to `1..=500`. Results are concatenated in input order.
///
/// # Errors
///
/// Propagates collaborator errors, and returns an external service error when a
/// batch comes back with the wrong number of elevations.
pub async fn lookup_elevations<L>(
    lookup: &L,
    coordinates: &[(f64, f64)],
    batch_size: usize,
) -> AppResult<Vec<f64>>
where
    L: ElevationLookup + ?Sized,
{
    let batch_size = batch_size.clamp(1, MAX_ELEVATION_BATCH);
    let mut elevations = Vec::with_capacity(coordinates.len());

    for (batch_index, batch) in coordinates.chunks(batch_size).enumerate() {
        let results = lookup.elevations(batch).await?;
        if results.len() != batch.len() {
            return Err(AppError::external_service(
                "elevation",
                format!(
                    "batch {batch_index} returned {} elevations for {} coordinates",
                    results.len(),
                    batch.len()
                ),
            ));
        }
        debug!(batch = batch_index, size = batch.len(), "Elevation batch resolved");
        elevations.extend(results);
    }

    Ok(elevations)
}

/// `(latitude, longitude)` pairs of a loaded activity
///
/// Samples where either coordinate is missing are skipped.
///
/// # Errors
///
/// Returns `TelemetryError::Lookup` if the activity has no latitude or longitude metric.
pub fn activity_coordinates(activity: &Activity) -> TelemetryResult<Vec<(f64, f64)>> {
    let series = |name: &str| {
        activity
            .find_metric(name)
            .and_then(Metric::value)
            .ok_or_else(|| {
                TelemetryError::lookup(format!(
                    "activity {} has no {name} metric",
                    activity.activity_id()
                ))
            })
    };
    let latitudes = series(LATITUDE)?;
    let longitudes = series(LONGITUDE)?;

    Ok(latitudes
        .iter()
        .zip(longitudes)
        .filter(|(lat, lon)| lat.is_finite() && lon.is_finite())
        .map(|(&lat, &lon)| (lat, lon))
        .collect())
}
