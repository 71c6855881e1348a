// ABOUTME: Metric model: one named telemetry channel with its identity key and value series
// ABOUTME: Native fields are keyed by string, Connect IQ fields by developer field number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use serde_json::Value;

use crate::constants::providers::NATIVE_APP_NAME;
use crate::errors::{TelemetryError, TelemetryResult};

/// Identity of a metric inside its provider's namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Native device field key (e.g. `directSpeed`)
    Native(String),
    /// Connect IQ developer field number, unique only within one app id
    Developer(u32),
}

impl MetricKey {
    /// Build the key for a native field
    #[must_use]
    pub fn native(key: impl Into<String>) -> Self {
        Self::Native(key.into())
    }
}

/// One telemetry channel of an activity
///
/// The identity (`key`) is fixed at construction. Only the value series can be
/// replaced afterwards, through [`Metric::set_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    name: String,
    unit: String,
    description: String,
    key: MetricKey,
    app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Vec<f64>>,
}

impl Metric {
    /// Create a metric from optional identity parts
    ///
    /// Exactly one of `key` and `developer_field_number` must be provided.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` when both are absent or both are set.
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        key: Option<String>,
        developer_field_number: Option<u32>,
    ) -> TelemetryResult<Self> {
        let name = name.into();
        let key = match (key, developer_field_number) {
            (Some(key), None) => MetricKey::Native(key),
            (None, Some(number)) => MetricKey::Developer(number),
            (None, None) => {
                return Err(TelemetryError::validation(format!(
                    "metric '{name}' needs a key or a developer field number"
                )))
            }
            (Some(key), Some(number)) => {
                return Err(TelemetryError::validation(format!(
                    "metric '{name}' has both key '{key}' and developer field number {number}"
                )))
            }
        };

        Ok(Self::with_key(name, unit, description, key))
    }

    /// Create a native metric keyed by string
    #[must_use]
    pub fn native(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::with_key(name, unit, description, MetricKey::Native(key.into()))
    }

    /// Create a Connect IQ metric keyed by developer field number
    #[must_use]
    pub fn developer(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        developer_field_number: u32,
    ) -> Self {
        Self::with_key(
            name,
            unit,
            description,
            MetricKey::Developer(developer_field_number),
        )
    }

    fn with_key(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        key: MetricKey,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
            key,
            app_name: NATIVE_APP_NAME.to_owned(),
            value: None,
        }
    }

    /// Set the name of the app emitting this metric
    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Attach or replace the value series
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Conversion` if an element is not numeric.
    pub fn set_value<S: IntoMetricSeries>(&mut self, series: S) -> TelemetryResult<()> {
        self.value = Some(series.into_series()?);
        Ok(())
    }

    /// Metric name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of the values
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Human readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identity key
    #[must_use]
    pub const fn key(&self) -> &MetricKey {
        &self.key
    }

    /// Name of the app emitting this metric
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Value series, `None` until loaded
    #[must_use]
    pub fn value(&self) -> Option<&[f64]> {
        self.value.as_deref()
    }

    /// Whether this metric comes from a Connect IQ app
    #[must_use]
    pub const fn is_third_party(&self) -> bool {
        matches!(self.key, MetricKey::Developer(_))
    }

    /// Whether this metric is a native device field
    #[must_use]
    pub const fn is_native(&self) -> bool {
        !self.is_third_party()
    }

    /// Name with the emitting app appended for third-party metrics
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_third_party() {
            format!("{} ({})", self.name, self.app_name)
        } else {
            self.name.clone()
        }
    }
}

/// Conversion of a caller supplied sequence into a flat numeric series
///
/// Missing samples become `NaN`.
pub trait IntoMetricSeries {
    /// Convert into a numeric series
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Conversion` naming the first non-numeric element.
    fn into_series(self) -> TelemetryResult<Vec<f64>>;
}

impl IntoMetricSeries for Vec<f64> {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        Ok(self)
    }
}

impl IntoMetricSeries for &[f64] {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        Ok(self.to_vec())
    }
}

impl IntoMetricSeries for Vec<Option<f64>> {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        Ok(self.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

impl IntoMetricSeries for &[Value] {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        self.iter()
            .enumerate()
            .map(|(index, value)| coerce_json(index, value))
            .collect()
    }
}

impl IntoMetricSeries for Vec<Value> {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        self.as_slice().into_series()
    }
}

impl IntoMetricSeries for Vec<&Value> {
    fn into_series(self) -> TelemetryResult<Vec<f64>> {
        self.into_iter()
            .enumerate()
            .map(|(index, value)| coerce_json(index, value))
            .collect()
    }
}

fn coerce_json(index: usize, value: &Value) -> TelemetryResult<f64> {
    match value {
        Value::Null => Ok(f64::NAN),
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| TelemetryError::conversion(index, format!("number {number}"))),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| TelemetryError::conversion(index, format!("string {text:?}"))),
        Value::Bool(flag) => Err(TelemetryError::conversion(index, format!("bool {flag}"))),
        Value::Array(_) => Err(TelemetryError::conversion(index, "nested array")),
        Value::Object(_) => Err(TelemetryError::conversion(index, "object")),
    }
}
