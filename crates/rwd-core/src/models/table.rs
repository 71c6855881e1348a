// ABOUTME: Time-indexed table of named numeric columns shared by assembler and resampler
// ABOUTME: NaN marks a missing sample; the index is a sequence of UTC timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::fmt::Write as _;
use std::ops::Range;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::errors::{TelemetryError, TelemetryResult};

/// One named column of a [`TimeTable`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    /// Column name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values, one per index entry
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Timestamp-indexed table with `f64` columns of equal length
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl TimeTable {
    /// Build a table from an index and named columns
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` when a column length differs from the
    /// index length or two columns share a name.
    pub fn new(
        index: Vec<DateTime<Utc>>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> TelemetryResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for (name, values) in &columns {
            if values.len() != index.len() {
                return Err(TelemetryError::validation(format!(
                    "column '{name}' has {} values for {} timestamps",
                    values.len(),
                    index.len()
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(TelemetryError::validation(format!(
                    "duplicate column '{name}'"
                )));
            }
        }

        Ok(Self {
            index,
            columns: columns
                .into_iter()
                .map(|(name, values)| Column { name, values })
                .collect(),
        })
    }

    /// Timestamp index
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All columns in insertion order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Values of the named column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(Column::values)
    }

    /// Whether every timestamp is strictly later than the previous one
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.index.windows(2).all(|pair| pair[0] < pair[1])
    }

    /// Copy of a contiguous range of rows
    ///
    /// Ranges past the end are clamped.
    #[must_use]
    pub fn slice_rows(&self, rows: Range<usize>) -> Self {
        let end = rows.end.min(self.len());
        let start = rows.start.min(end);
        Self {
            index: self.index[start..end].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|column| Column {
                    name: column.name.clone(),
                    values: column.values[start..end].to_vec(),
                })
                .collect(),
        }
    }

    /// Render as CSV with a leading `Timestamp` column in RFC 3339
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Timestamp");
        for column in &self.columns {
            out.push(',');
            out.push_str(&column.name);
        }
        out.push('\n');

        for (row, timestamp) in self.index.iter().enumerate() {
            out.push_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true));
            for column in &self.columns {
                let _ = write!(out, ",{}", column.values[row]);
            }
            out.push('\n');
        }
        out
    }
}
