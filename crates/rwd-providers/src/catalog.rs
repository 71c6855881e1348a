// ABOUTME: Provider catalog: a named data source with its app id and metric templates
// ABOUTME: Lookup by metric identity key within one provider's namespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use rwd_core::constants::providers::{APP_STORE_URL, GARMIN_NATIVE_APP_ID};
use rwd_core::errors::{TelemetryError, TelemetryResult};
use rwd_core::models::{Metric, MetricKey};
use uuid::Uuid;

/// Immutable catalog of the metrics one data source can emit
///
/// Metric keys are unique within a provider. Connect IQ field numbers are only
/// meaningful together with the provider's `app_id`.
#[derive(Debug, Clone)]
pub struct ProviderDefinition {
    name: String,
    app_id: Uuid,
    author: String,
    metrics: HashMap<MetricKey, Metric>,
    order: Vec<MetricKey>,
}

impl ProviderDefinition {
    /// Build a provider, rejecting duplicate metric keys
    ///
    /// Connect IQ metric templates are stamped with the provider name as their
    /// app name; native templates keep theirs.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if two metrics share an identity key.
    pub fn new(
        name: impl Into<String>,
        app_id: Uuid,
        author: impl Into<String>,
        metrics: Vec<Metric>,
    ) -> TelemetryResult<Self> {
        let mut provider = Self::empty(name.into(), app_id, author.into(), metrics.len());
        for metric in metrics {
            let key = metric.key().clone();
            if !provider.insert(metric) {
                return Err(TelemetryError::validation(format!(
                    "provider '{}' defines metric key {key:?} twice",
                    provider.name
                )));
            }
        }
        Ok(provider)
    }

    /// Build one of the compiled-in catalogs
    pub(crate) fn builtin(name: &str, app_id: Uuid, author: &str, metrics: Vec<Metric>) -> Self {
        let mut provider = Self::empty(name.to_owned(), app_id, author.to_owned(), metrics.len());
        for metric in metrics {
            provider.insert(metric);
        }
        provider
    }

    fn empty(name: String, app_id: Uuid, author: String, capacity: usize) -> Self {
        Self {
            name,
            app_id,
            author,
            metrics: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Insert a template unless its key is taken; returns whether it was inserted
    fn insert(&mut self, metric: Metric) -> bool {
        let metric = if metric.is_third_party() {
            metric.with_app_name(self.name.clone())
        } else {
            metric
        };
        let key = metric.key().clone();
        if self.metrics.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.metrics.insert(key, metric);
        true
    }

    /// Look up a metric template by identity key
    #[must_use]
    pub fn get(&self, key: &MetricKey) -> Option<&Metric> {
        self.metrics.get(key)
    }

    /// Provider name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connect IQ app id (nil for the native catalog)
    #[must_use]
    pub const fn app_id(&self) -> Uuid {
        self.app_id
    }

    /// Provider author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Whether this is the device's own field catalog
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.app_id == GARMIN_NATIVE_APP_ID
    }

    /// Store page of the app
    #[must_use]
    pub fn app_url(&self) -> String {
        format!("{APP_STORE_URL}/{}", self.app_id)
    }

    /// Metric templates in catalog order
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.order.iter().filter_map(|key| self.metrics.get(key))
    }

    /// Number of metric templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog has no metrics
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = ProviderDefinition::new(
            "Test",
            Uuid::new_v4(),
            "Tester",
            vec![
                Metric::developer("Power", "W", "", 0),
                Metric::developer("Other Power", "W", "", 0),
            ],
        );
        assert!(matches!(result, Err(TelemetryError::Validation(_))));
    }

    #[test]
    fn test_developer_metrics_carry_provider_name() {
        let provider = ProviderDefinition::new(
            "Wind App",
            Uuid::new_v4(),
            "Tester",
            vec![Metric::developer("Wind", "m/s", "Head wind", 3)],
        )
        .unwrap();

        let metric = provider.get(&MetricKey::Developer(3)).unwrap();
        assert_eq!(metric.app_name(), "Wind App");
        assert!(provider.get(&MetricKey::Developer(4)).is_none());
        assert!(!provider.is_native());
        assert!(provider
            .app_url()
            .starts_with("https://apps.garmin.com/apps/"));
    }
}
