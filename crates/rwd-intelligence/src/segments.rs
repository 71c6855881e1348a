// ABOUTME: Splits a telemetry table into moving segments separated by stops
// ABOUTME: A stop is a run of consecutive zero-speed samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::iter;

use rwd_core::constants::metric_names::SPEED;
use rwd_core::errors::{TelemetryError, TelemetryResult};
use rwd_core::models::TimeTable;

/// Split a table on stops
///
/// A row is dropped when its speed is missing, or when it is zero and an
/// adjacent row is zero too. An isolated zero-speed sample stays inside its
/// segment. Each maximal run of kept rows becomes one table.
///
/// # Errors
///
/// Returns `TelemetryError::Lookup` if the table has no `Speed` column.
pub fn split_segments(table: &TimeTable) -> TelemetryResult<Vec<TimeTable>> {
    let speed = table
        .column(SPEED)
        .ok_or_else(|| TelemetryError::lookup("table has no Speed column"))?;

    let is_zero = |row: Option<&f64>| row.is_some_and(|&value| value == 0.0);
    let kept: Vec<bool> = speed
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            if value.is_nan() {
                return false;
            }
            let stopped = value == 0.0
                && ((row > 0 && is_zero(speed.get(row - 1))) || is_zero(speed.get(row + 1)));
            !stopped
        })
        .collect();

    let mut segments = Vec::new();
    let mut start = None;
    for (row, &keep) in kept.iter().chain(iter::once(&false)).enumerate() {
        match (keep, start) {
            (true, None) => start = Some(row),
            (false, Some(first)) => {
                segments.push(table.slice_rows(first..row));
                start = None;
            }
            _ => {}
        }
    }
    Ok(segments)
}
