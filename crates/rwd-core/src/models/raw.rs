// ABOUTME: Raw activity summary and detail payload shapes returned by the activity service
// ABOUTME: Serde models for activity lists, metric descriptors and the samples x descriptors matrix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::fields::IQ_DEVELOPER_MARKER;

/// Activity summary returned from the activity list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivitySummary {
    /// Unique activity identifier (numeric on the wire, kept as text)
    #[serde(deserialize_with = "deserialize_activity_id")]
    pub activity_id: String,
    /// Start time in the activity's local timezone
    pub start_time_local: String,
    /// Start time in GMT
    #[serde(rename = "startTimeGMT")]
    pub start_time_gmt: String,
    /// User-provided or auto-generated name
    #[serde(default)]
    pub activity_name: Option<String>,
    /// Calories burned
    #[serde(default)]
    pub calories: Option<f64>,
    /// Activity type information
    pub activity_type: RawActivityType,
}

/// Activity type block of a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityType {
    /// Type key such as `running` or `treadmill_running`
    pub type_key: String,
}

/// Description of one column of the detail matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Field key; Connect IQ fields contain the `IQDeveloper` marker
    pub key: String,
    /// Connect IQ app id for developer fields
    #[serde(rename = "appID", default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Developer field number inside the app's namespace
    #[serde(
        rename = "developerFieldNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub developer_field_number: Option<u32>,
    /// Column index reported by the service (informational; position is authoritative)
    #[serde(
        rename = "metricsIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics_index: Option<usize>,
}

impl MetricDescriptor {
    /// Descriptor of a native field
    #[must_use]
    pub fn native(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            app_id: None,
            developer_field_number: None,
            metrics_index: None,
        }
    }

    /// Descriptor of a Connect IQ developer field
    #[must_use]
    pub fn developer(key: impl Into<String>, app_id: impl Into<String>, number: u32) -> Self {
        Self {
            key: key.into(),
            app_id: Some(app_id.into()),
            developer_field_number: Some(number),
            metrics_index: None,
        }
    }

    /// Whether the key marks a Connect IQ developer field
    #[must_use]
    pub fn is_third_party(&self) -> bool {
        self.key.contains(IQ_DEVELOPER_MARKER)
    }
}

/// One row of the detail matrix: every field's value at one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSample {
    /// Values in descriptor order
    pub metrics: Vec<Value>,
}

/// Activity detail payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityDetail {
    /// Ordered field descriptors
    pub metric_descriptors: Vec<MetricDescriptor>,
    /// Sample rows (samples x descriptors)
    #[serde(default)]
    pub activity_detail_metrics: Vec<DetailSample>,
}

impl RawActivityDetail {
    /// Build a payload from descriptors and row-major samples
    #[must_use]
    pub fn new(metric_descriptors: Vec<MetricDescriptor>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            metric_descriptors,
            activity_detail_metrics: rows
                .into_iter()
                .map(|metrics| DetailSample { metrics })
                .collect(),
        }
    }

    /// Number of samples (matrix rows)
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.activity_detail_metrics.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityIdRepr {
    Text(String),
    Number(u64),
}

fn deserialize_activity_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ActivityIdRepr::deserialize(deserializer)? {
        ActivityIdRepr::Text(text) => text,
        ActivityIdRepr::Number(number) => number.to_string(),
    })
}
