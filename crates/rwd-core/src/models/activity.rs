// ABOUTME: Running activity record assembled from a raw summary and its detail payload
// ABOUTME: Timezone derivation, positional metric slots, and conversion into a TimeTable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::metric::Metric;
use super::raw::{MetricDescriptor, RawActivityDetail, RawActivitySummary};
use super::table::TimeTable;
use crate::constants::activity_types::TREADMILL_RUNNING;
use crate::constants::metric_names::TIMESTAMP;
use crate::constants::providers::ACTIVITY_URL;
use crate::errors::{TelemetryError, TelemetryResult};

/// Accepted layouts for summary start times
const START_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Maps a raw field descriptor to the metric template that owns it
///
/// Implemented by the provider registry. Returning `None` means the field is
/// unknown and is recorded as an unresolved slot.
pub trait MetricResolver {
    /// Resolve one descriptor to its metric template
    fn resolve(&self, descriptor: &MetricDescriptor) -> Option<&Metric>;
}

/// One position of an activity's metric list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricSlot {
    /// Descriptor resolved to a metric, with its series attached
    Resolved(Metric),
    /// Descriptor present in the payload but not matched to any provider field
    Unresolved {
        /// Descriptor key
        key: String,
        /// App id for Connect IQ fields
        #[serde(skip_serializing_if = "Option::is_none")]
        app_id: Option<String>,
    },
}

impl MetricSlot {
    fn unresolved(descriptor: &MetricDescriptor) -> Self {
        Self::Unresolved {
            key: descriptor.key.clone(),
            app_id: descriptor.app_id.clone(),
        }
    }

    /// Resolved metric, if any
    #[must_use]
    pub const fn as_metric(&self) -> Option<&Metric> {
        match self {
            Self::Resolved(metric) => Some(metric),
            Self::Unresolved { .. } => None,
        }
    }

    /// Whether this slot holds a metric
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A running activity with its (optionally loaded) telemetry
///
/// Fields are private; build with [`Activity::from_raw_activity`] and attach
/// telemetry with [`Activity::load_details`].
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    activity_id: String,
    start_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_name: Option<String>,
    timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    calories: Option<f64>,
    is_treadmill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Vec<MetricSlot>>,
}

impl Activity {
    /// Build an activity from its list summary
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if a start time cannot be parsed.
    pub fn from_raw_activity(raw: &RawActivitySummary) -> TelemetryResult<Self> {
        let start_time = parse_start_time(&raw.start_time_local)?;
        let timezone = derive_timezone(&raw.start_time_local, &raw.start_time_gmt)?;

        Ok(Self {
            activity_id: raw.activity_id.clone(),
            start_time,
            activity_name: raw.activity_name.clone(),
            timezone,
            calories: raw.calories,
            is_treadmill: raw.activity_type.type_key == TREADMILL_RUNNING,
            metrics: None,
        })
    }

    /// Resolve every descriptor of a detail payload and attach its column
    ///
    /// Slot order follows descriptor order. Unknown fields and columns that
    /// cannot be converted become [`MetricSlot::Unresolved`].
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Lookup` if any sample row does not have exactly
    /// one value per descriptor. The activity is left unchanged in that case.
    pub fn load_details<R>(&mut self, detail: &RawActivityDetail, resolver: &R) -> TelemetryResult<()>
    where
        R: MetricResolver + ?Sized,
    {
        let width = detail.metric_descriptors.len();
        let rows = &detail.activity_detail_metrics;
        if let Some((row, sample)) = rows
            .iter()
            .enumerate()
            .find(|(_, sample)| sample.metrics.len() != width)
        {
            return Err(TelemetryError::lookup(format!(
                "sample {row} has {} values for {width} metric descriptors",
                sample.metrics.len()
            )));
        }

        let slots = detail
            .metric_descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| {
                let Some(template) = resolver.resolve(descriptor) else {
                    debug!(
                        activity.id = %self.activity_id,
                        field.key = %descriptor.key,
                        field.position = position,
                        "Unresolved metric descriptor"
                    );
                    return MetricSlot::unresolved(descriptor);
                };

                let column: Vec<&Value> = rows.iter().map(|row| &row.metrics[position]).collect();
                let mut metric = template.clone();
                match metric.set_value(column) {
                    Ok(()) => MetricSlot::Resolved(metric),
                    Err(error) => {
                        warn!(
                            activity.id = %self.activity_id,
                            metric.name = %metric.name(),
                            error = %error,
                            "Dropping metric with non-numeric samples"
                        );
                        MetricSlot::unresolved(descriptor)
                    }
                }
            })
            .collect();

        self.metrics = Some(slots);
        Ok(())
    }

    /// Build a timestamp-indexed table from the loaded metrics
    ///
    /// The `Timestamp` metric (epoch milliseconds) becomes the index. Metrics that
    /// share a name are suffixed with their app name (`"Power - Garmin"`). A
    /// descriptor repeated in the payload keeps its data under
    /// `"<column> #<position>"`.
    ///
    /// # Errors
    ///
    /// - `TelemetryError::Lookup` if details are not loaded or no timestamp metric exists
    /// - `TelemetryError::Validation` if timestamps are invalid or not strictly increasing
    pub fn to_table(&self) -> TelemetryResult<TimeTable> {
        let metrics = self.metrics.as_deref().ok_or_else(|| {
            TelemetryError::lookup(format!(
                "details for activity {} are not loaded",
                self.activity_id
            ))
        })?;

        let timestamps = metrics
            .iter()
            .filter_map(MetricSlot::as_metric)
            .find(|metric| metric.name() == TIMESTAMP)
            .and_then(Metric::value)
            .ok_or_else(|| {
                TelemetryError::lookup(format!(
                    "activity {} has no timestamp metric",
                    self.activity_id
                ))
            })?;

        let index = timestamps
            .iter()
            .map(|&millis| millis_to_datetime(millis))
            .collect::<TelemetryResult<Vec<_>>>()?;

        let channels: Vec<(usize, &Metric)> = metrics
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_metric().map(|metric| (position, metric)))
            .filter(|(_, metric)| metric.name() != TIMESTAMP)
            .collect();

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for (_, metric) in &channels {
            *name_counts.entry(metric.name()).or_default() += 1;
        }

        let mut taken: HashSet<String> = HashSet::new();
        let mut columns = Vec::with_capacity(channels.len());
        for (position, metric) in channels {
            let mut name = if name_counts.get(metric.name()).copied().unwrap_or(0) > 1 {
                format!("{} - {}", metric.name(), metric.app_name())
            } else {
                metric.name().to_owned()
            };
            if taken.contains(&name) {
                warn!(
                    activity.id = %self.activity_id,
                    column = %name,
                    position,
                    "Repeated field descriptor, suffixing column with its position"
                );
                name = format!("{name} #{position}");
            }
            taken.insert(name.clone());
            columns.push((name, metric.value().map(<[f64]>::to_vec).unwrap_or_default()));
        }

        let table = TimeTable::new(index, columns)?;
        if !table.is_strictly_increasing() {
            return Err(TelemetryError::validation(format!(
                "timestamps of activity {} are not strictly increasing",
                self.activity_id
            )));
        }
        Ok(table)
    }

    /// Stable external identifier
    #[must_use]
    pub fn activity_id(&self) -> &str {
        &self.activity_id
    }

    /// Local start time
    #[must_use]
    pub const fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Activity name
    #[must_use]
    pub fn activity_name(&self) -> Option<&str> {
        self.activity_name.as_deref()
    }

    /// Whole-hour UTC offset label (`GMT+2`, `GMT-5`)
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Calories burned
    #[must_use]
    pub const fn calories(&self) -> Option<f64> {
        self.calories
    }

    /// Whether the activity was recorded on a treadmill
    #[must_use]
    pub const fn is_treadmill(&self) -> bool {
        self.is_treadmill
    }

    /// Metric slots in descriptor order, `None` until details are loaded
    #[must_use]
    pub fn metrics(&self) -> Option<&[MetricSlot]> {
        self.metrics.as_deref()
    }

    /// Whether [`Activity::load_details`] has run
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.metrics.is_some()
    }

    /// Resolved metrics in descriptor order
    pub fn resolved_metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics
            .iter()
            .flatten()
            .filter_map(MetricSlot::as_metric)
    }

    /// Position of the first resolved metric with this name (case-insensitive)
    #[must_use]
    pub fn metric_index(&self, name: &str) -> Option<usize> {
        self.metrics.as_ref()?.iter().position(|slot| {
            slot.as_metric()
                .is_some_and(|metric| metric.name().eq_ignore_ascii_case(name))
        })
    }

    /// First resolved metric with this name (case-insensitive)
    #[must_use]
    pub fn find_metric(&self, name: &str) -> Option<&Metric> {
        self.resolved_metrics()
            .find(|metric| metric.name().eq_ignore_ascii_case(name))
    }

    /// Link to the activity page
    #[must_use]
    pub fn url(&self) -> String {
        format!("{ACTIVITY_URL}/{}", self.activity_id)
    }
}

/// Derive the whole-hour offset label between a local and a GMT start time
///
/// The hour difference is truncated toward zero; zero renders as `GMT+0`.
///
/// # Errors
///
/// Returns `TelemetryError::Validation` if either timestamp cannot be parsed.
pub fn derive_timezone(start_local: &str, start_gmt: &str) -> TelemetryResult<String> {
    let local = parse_start_time(start_local)?;
    let gmt = parse_start_time(start_gmt)?;
    let hours = (local - gmt).num_seconds() / 3600;
    let sign = if hours < 0 { '-' } else { '+' };
    Ok(format!("GMT{sign}{}", hours.abs()))
}

fn parse_start_time(value: &str) -> TelemetryResult<NaiveDateTime> {
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| TelemetryError::validation(format!("invalid start time '{value}'")))
}

fn millis_to_datetime(millis: f64) -> TelemetryResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(TelemetryError::validation(format!(
            "invalid timestamp sample {millis}"
        )));
    }
    DateTime::from_timestamp_millis(millis.round() as i64).ok_or_else(|| {
        TelemetryError::validation(format!("timestamp {millis} is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw::RawActivityType;

    fn summary(type_key: &str) -> RawActivitySummary {
        RawActivitySummary {
            activity_id: "42".to_owned(),
            start_time_local: "2024-01-01 10:00:00".to_owned(),
            start_time_gmt: "2024-01-01 08:00:00".to_owned(),
            activity_name: Some("Lunch Run".to_owned()),
            calories: Some(420.0),
            activity_type: RawActivityType {
                type_key: type_key.to_owned(),
            },
        }
    }

    #[test]
    fn test_timezone_positive_and_negative() {
        assert_eq!(
            derive_timezone("2024-01-01T10:00:00", "2024-01-01T08:00:00").unwrap(),
            "GMT+2"
        );
        assert_eq!(
            derive_timezone("2024-01-01 03:00:00", "2024-01-01 08:00:00").unwrap(),
            "GMT-5"
        );
        assert_eq!(
            derive_timezone("2024-01-01 08:00:00", "2024-01-01 08:00:00").unwrap(),
            "GMT+0"
        );
    }

    #[test]
    fn test_timezone_truncates_toward_zero() {
        // +5:30 and -3:30 keep only the whole hours
        assert_eq!(
            derive_timezone("2024-01-01 13:30:00", "2024-01-01 08:00:00").unwrap(),
            "GMT+5"
        );
        assert_eq!(
            derive_timezone("2024-01-01 04:30:00", "2024-01-01 08:00:00").unwrap(),
            "GMT-3"
        );
    }

    #[test]
    fn test_invalid_start_time() {
        let mut raw = summary("running");
        raw.start_time_local = "yesterday".to_owned();
        assert!(matches!(
            Activity::from_raw_activity(&raw),
            Err(TelemetryError::Validation(_))
        ));
    }

    #[test]
    fn test_from_raw_activity() {
        let activity = Activity::from_raw_activity(&summary("treadmill_running")).unwrap();
        assert_eq!(activity.activity_id(), "42");
        assert_eq!(activity.timezone(), "GMT+2");
        assert!(activity.is_treadmill());
        assert!(!activity.is_loaded());
        assert_eq!(
            activity.url(),
            "https://connect.garmin.com/modern/activity/42"
        );

        let outdoor = Activity::from_raw_activity(&summary("running")).unwrap();
        assert!(!outdoor.is_treadmill());
    }

    #[test]
    fn test_to_table_requires_loaded_details() {
        let activity = Activity::from_raw_activity(&summary("running")).unwrap();
        assert!(matches!(
            activity.to_table(),
            Err(TelemetryError::Lookup(_))
        ));
    }
}
