// ABOUTME: Break-aware resampling of irregular telemetry tables onto a uniform time grid
// ABOUTME: Zero-fills rows inside recording breaks and forward-fills short irregular gaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Resampler
//!
//! Devices record at a variable rate (smart recording) and stop recording while
//! the run is paused. The resampler turns such a table into one row per `step`
//! from the first to the last timestamp:
//!
//! 1. a grid row takes the original values only when an original sample falls
//!    exactly on it;
//! 2. a grid row further than `break_threshold` from the latest original sample
//!    at or before it is a break row and every column is zero;
//! 3. every other missing value carries the last known value forward, and values
//!    still missing at the start of the table become zero.

use std::iter;

use chrono::{DateTime, TimeDelta, Utc};
use rayon::prelude::*;
use rwd_core::constants::resample::{
    DEFAULT_BREAK_THRESHOLD_SECS, DEFAULT_STEP_SECS, MAX_GRID_ROWS,
};
use rwd_core::errors::{TelemetryError, TelemetryResult};
use rwd_core::models::TimeTable;
use tracing::debug;

/// Resampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Grid step
    pub step: TimeDelta,
    /// Gaps strictly longer than this are breaks
    pub break_threshold: TimeDelta,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            step: TimeDelta::seconds(DEFAULT_STEP_SECS),
            break_threshold: TimeDelta::seconds(DEFAULT_BREAK_THRESHOLD_SECS),
        }
    }
}

impl ResampleConfig {
    /// Build a configuration from whole seconds
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if the step is not positive, the
    /// threshold is negative, or either is out of range.
    pub fn from_secs(step_secs: i64, break_threshold_secs: i64) -> TelemetryResult<Self> {
        let step = TimeDelta::try_seconds(step_secs).ok_or_else(|| {
            TelemetryError::validation(format!("step of {step_secs}s is out of range"))
        })?;
        let break_threshold = TimeDelta::try_seconds(break_threshold_secs).ok_or_else(|| {
            TelemetryError::validation(format!(
                "break threshold of {break_threshold_secs}s is out of range"
            ))
        })?;

        let config = Self {
            step,
            break_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if the step is shorter than one
    /// millisecond or the threshold is negative.
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.step < TimeDelta::milliseconds(1) {
            return Err(TelemetryError::validation(format!(
                "resample step must be at least 1ms, got {}ms",
                self.step.num_milliseconds()
            )));
        }
        if self.break_threshold < TimeDelta::zero() {
            return Err(TelemetryError::validation(format!(
                "break threshold must not be negative, got {}ms",
                self.break_threshold.num_milliseconds()
            )));
        }
        Ok(())
    }
}

/// Where a grid row takes its values from
#[derive(Debug, Clone, Copy)]
struct RowAnchor {
    /// Original row sitting exactly on this grid timestamp
    source: Option<usize>,
    /// Gap to the previous original sample exceeds the threshold
    is_break: bool,
}

/// Resample one table onto a uniform grid
///
/// An empty table yields an empty table with the same columns.
///
/// # Errors
///
/// Returns `TelemetryError::Validation` for an invalid configuration, a table
/// whose index is not strictly increasing, or a grid that would exceed the row limit.
pub fn resample(table: &TimeTable, config: &ResampleConfig) -> TelemetryResult<TimeTable> {
    config.validate()?;
    if !table.is_strictly_increasing() {
        return Err(TelemetryError::validation(
            "cannot resample a table whose timestamps are not strictly increasing",
        ));
    }

    let index = table.index();
    let (Some(&first), Some(&last)) = (index.first(), index.last()) else {
        return TimeTable::new(
            Vec::new(),
            table
                .column_names()
                .map(|name| (name.to_owned(), Vec::new()))
                .collect(),
        );
    };

    let grid = build_grid(first, last, config.step)?;
    let anchors = anchor_rows(index, &grid, config.break_threshold);

    let columns = table
        .columns()
        .iter()
        .map(|column| {
            (
                column.name().to_owned(),
                fill_column(column.values(), &anchors),
            )
        })
        .collect();

    debug!(
        rows_in = table.len(),
        rows_out = grid.len(),
        breaks = anchors.iter().filter(|anchor| anchor.is_break).count(),
        "Resampled telemetry table"
    );

    TimeTable::new(grid, columns)
}

/// Resample independent tables in parallel, preserving input order
#[must_use]
pub fn resample_all(
    tables: &[TimeTable],
    config: &ResampleConfig,
) -> Vec<TelemetryResult<TimeTable>> {
    tables
        .par_iter()
        .map(|table| resample(table, config))
        .collect()
}

fn build_grid(
    first: DateTime<Utc>,
    last: DateTime<Utc>,
    step: TimeDelta,
) -> TelemetryResult<Vec<DateTime<Utc>>> {
    let rows = (last - first).num_milliseconds() / step.num_milliseconds() + 1;
    if rows > MAX_GRID_ROWS {
        return Err(TelemetryError::validation(format!(
            "resampling would produce {rows} rows (limit {MAX_GRID_ROWS})"
        )));
    }

    Ok(
        iter::successors(Some(first), |timestamp| timestamp.checked_add_signed(step))
            .take_while(|timestamp| *timestamp <= last)
            .collect(),
    )
}

fn anchor_rows(
    index: &[DateTime<Utc>],
    grid: &[DateTime<Utc>],
    break_threshold: TimeDelta,
) -> Vec<RowAnchor> {
    let mut position = 0;
    grid.iter()
        .map(|&timestamp| {
            while position + 1 < index.len() && index[position + 1] <= timestamp {
                position += 1;
            }
            let gap = timestamp - index[position];
            RowAnchor {
                source: (gap == TimeDelta::zero()).then_some(position),
                is_break: gap > break_threshold,
            }
        })
        .collect()
}

fn fill_column(values: &[f64], anchors: &[RowAnchor]) -> Vec<f64> {
    let mut last_known = f64::NAN;
    anchors
        .iter()
        .map(|anchor| {
            let value = if anchor.is_break {
                0.0
            } else {
                anchor.source.map_or(f64::NAN, |row| values[row])
            };

            if value.is_nan() {
                if last_known.is_nan() {
                    0.0
                } else {
                    last_known
                }
            } else {
                last_known = value;
                value
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_704_096_000 + secs, 0).unwrap()
    }

    fn table(secs: &[i64], values: &[f64]) -> TimeTable {
        TimeTable::new(
            secs.iter().map(|&s| ts(s)).collect(),
            vec![("Power".to_owned(), values.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config() {
        assert!(ResampleConfig::from_secs(0, 10).is_err());
        assert!(ResampleConfig::from_secs(1, -1).is_err());
        assert!(ResampleConfig::from_secs(i64::MAX, 10).is_err());
        assert_eq!(
            ResampleConfig::from_secs(1, 10).unwrap(),
            ResampleConfig::default()
        );
    }

    #[test]
    fn test_forward_fill_irregular_samples() {
        let result = resample(
            &table(&[0, 3, 4], &[100.0, 200.0, 300.0]),
            &ResampleConfig::default(),
        )
        .unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(
            result.column("Power").unwrap(),
            [100.0, 100.0, 100.0, 200.0, 300.0].as_slice()
        );
    }

    #[test]
    fn test_nan_inside_original_row_is_forward_filled() {
        let result = resample(
            &table(&[0, 1, 2], &[f64::NAN, 5.0, f64::NAN]),
            &ResampleConfig::default(),
        )
        .unwrap();
        assert_eq!(result.column("Power").unwrap(), [0.0, 5.0, 5.0].as_slice());
    }

    #[test]
    fn test_off_grid_samples_are_not_picked_up() {
        let index = vec![
            ts(0),
            ts(1) + TimeDelta::milliseconds(500),
            ts(3),
        ];
        let input = TimeTable::new(index, vec![("Speed".to_owned(), vec![1.0, 2.0, 3.0])])
            .unwrap();
        let result = resample(&input, &ResampleConfig::default()).unwrap();
        assert_eq!(
            result.column("Speed").unwrap(),
            [1.0, 1.0, 1.0, 3.0].as_slice()
        );
    }

    #[test]
    fn test_empty_table() {
        let input = TimeTable::new(Vec::new(), vec![("Speed".to_owned(), Vec::new())]).unwrap();
        let result = resample(&input, &ResampleConfig::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.column_names().collect::<Vec<_>>(), ["Speed"]);
    }
}
