// ABOUTME: Metric registry resolving raw field descriptors to provider metric templates
// ABOUTME: Table-driven dispatch on Connect IQ app id with a process-wide shared instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::iter;
use std::sync::{Arc, OnceLock};

use rwd_core::errors::{TelemetryError, TelemetryResult};
use rwd_core::models::{Metric, MetricDescriptor, MetricKey, MetricResolver};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::ProviderDefinition;
use crate::catalogs::{garmin_default_fields, run_power_model, stryd_zones};

/// Registry of every known metric provider
///
/// Native fields are looked up by descriptor key in the native catalog. Connect IQ
/// fields are dispatched on their app id, then looked up by developer field
/// number. Adding a third-party app is a matter of calling [`MetricRegistry::register`].
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    native: ProviderDefinition,
    providers: HashMap<Uuid, ProviderDefinition>,
}

impl MetricRegistry {
    /// Create a registry with only a native catalog
    #[must_use]
    pub fn new(native: ProviderDefinition) -> Self {
        Self {
            native,
            providers: HashMap::new(),
        }
    }

    /// Create a registry with the native catalog, StrydZones and RunPowerModel
    #[must_use]
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new(garmin_default_fields());
        for provider in [stryd_zones(), run_power_model()] {
            registry.providers.insert(provider.app_id(), provider);
        }

        info!(
            "Metric registry initialized with {} Connect IQ provider(s): [{}]",
            registry.providers.len(),
            registry
                .third_party_providers()
                .map(ProviderDefinition::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        registry
    }

    /// Add a Connect IQ provider
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if the app id is already registered
    /// (including the native app id).
    pub fn register(&mut self, provider: ProviderDefinition) -> TelemetryResult<()> {
        let app_id = provider.app_id();
        if app_id == self.native.app_id() || self.providers.contains_key(&app_id) {
            return Err(TelemetryError::validation(format!(
                "provider app id {app_id} is already registered"
            )));
        }
        self.providers.insert(app_id, provider);
        Ok(())
    }

    /// Native device catalog
    #[must_use]
    pub const fn native(&self) -> &ProviderDefinition {
        &self.native
    }

    /// Connect IQ provider registered under `app_id`
    #[must_use]
    pub fn provider(&self, app_id: &Uuid) -> Option<&ProviderDefinition> {
        self.providers.get(app_id)
    }

    /// Connect IQ providers sorted by name
    pub fn third_party_providers(&self) -> impl Iterator<Item = &ProviderDefinition> {
        let mut providers: Vec<_> = self.providers.values().collect();
        providers.sort_by(|a, b| a.name().cmp(b.name()));
        providers.into_iter()
    }

    /// Native catalog followed by the Connect IQ providers
    pub fn providers(&self) -> impl Iterator<Item = &ProviderDefinition> {
        iter::once(&self.native).chain(self.third_party_providers())
    }

    /// Provider owning a descriptor's field
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::UnknownProvider` for a Connect IQ descriptor whose
    /// app id is missing, malformed or not registered.
    pub fn provider_for(
        &self,
        descriptor: &MetricDescriptor,
    ) -> TelemetryResult<&ProviderDefinition> {
        if !descriptor.is_third_party() {
            return Ok(&self.native);
        }

        let raw_app_id = descriptor.app_id.as_deref().unwrap_or_default();
        Uuid::parse_str(raw_app_id)
            .ok()
            .and_then(|app_id| self.providers.get(&app_id))
            .ok_or_else(|| TelemetryError::unknown_provider(raw_app_id))
    }

    /// Metric template for a descriptor, `None` when unknown
    ///
    /// Unknown Connect IQ apps are logged and skipped.
    #[must_use]
    pub fn resolve(&self, descriptor: &MetricDescriptor) -> Option<&Metric> {
        let provider = match self.provider_for(descriptor) {
            Ok(provider) => provider,
            Err(error) => {
                warn!(
                    field.key = %descriptor.key,
                    error = %error,
                    "Skipping field from unregistered provider"
                );
                return None;
            }
        };

        if descriptor.is_third_party() {
            let number = descriptor.developer_field_number?;
            provider.get(&MetricKey::Developer(number))
        } else {
            provider.get(&MetricKey::native(descriptor.key.as_str()))
        }
    }

    /// Name of the provider registered under `app_id`
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::UnknownProvider` if no provider matches.
    pub fn app_name(&self, app_id: &str) -> TelemetryResult<&str> {
        let parsed =
            Uuid::parse_str(app_id).map_err(|_| TelemetryError::unknown_provider(app_id))?;
        if parsed == self.native.app_id() {
            return Ok(self.native.name());
        }
        self.providers
            .get(&parsed)
            .map(ProviderDefinition::name)
            .ok_or_else(|| TelemetryError::unknown_provider(app_id))
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::with_builtin_providers()
    }
}

impl MetricResolver for MetricRegistry {
    fn resolve(&self, descriptor: &MetricDescriptor) -> Option<&Metric> {
        Self::resolve(self, descriptor)
    }
}

static REGISTRY: OnceLock<Arc<MetricRegistry>> = OnceLock::new();

/// Get the process-wide metric registry
///
/// For tests that register extra providers, build a local
/// `MetricRegistry::with_builtin_providers()` instead.
#[must_use]
pub fn global_registry() -> Arc<MetricRegistry> {
    REGISTRY
        .get_or_init(|| Arc::new(MetricRegistry::with_builtin_providers()))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwd_core::constants::providers::{RUN_POWER_MODEL_APP_ID, STRYD_ZONES_APP_ID};

    #[test]
    fn test_native_dispatch() {
        let registry = MetricRegistry::with_builtin_providers();
        let metric = registry
            .resolve(&MetricDescriptor::native("directHeartRate"))
            .unwrap();
        assert_eq!(metric.name(), "Heart Rate");
        assert!(registry
            .resolve(&MetricDescriptor::native("directNothing"))
            .is_none());
    }

    #[test]
    fn test_same_field_number_in_two_apps() {
        let registry = MetricRegistry::with_builtin_providers();

        let stryd = MetricDescriptor::developer(
            "directIQDeveloperField",
            STRYD_ZONES_APP_ID.to_string(),
            0,
        );
        let rpm = MetricDescriptor::developer(
            "directIQDeveloperField",
            RUN_POWER_MODEL_APP_ID.to_string(),
            0,
        );
        assert_eq!(registry.resolve(&stryd).map(Metric::name), Some("Power"));
        assert_eq!(
            registry.resolve(&rpm).map(Metric::name),
            Some("Running Power")
        );
    }

    #[test]
    fn test_unknown_app_id() {
        let registry = MetricRegistry::with_builtin_providers();
        let descriptor = MetricDescriptor::developer(
            "directIQDeveloperField",
            "11111111-2222-3333-4444-555555555555",
            8,
        );
        assert!(matches!(
            registry.provider_for(&descriptor),
            Err(TelemetryError::UnknownProvider { .. })
        ));
        assert!(registry.resolve(&descriptor).is_none());

        let malformed = MetricDescriptor::developer("directIQDeveloperField", "not-a-uuid", 8);
        assert!(registry.resolve(&malformed).is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = MetricRegistry::with_builtin_providers();
        assert!(matches!(
            registry.register(stryd_zones()),
            Err(TelemetryError::Validation(_))
        ));
        assert!(matches!(
            registry.register(garmin_default_fields()),
            Err(TelemetryError::Validation(_))
        ));
    }

    #[test]
    fn test_app_name_lookup() {
        let registry = global_registry();
        assert_eq!(
            registry.app_name(&STRYD_ZONES_APP_ID.to_string()).unwrap(),
            "StrydZones - Running Power Zones"
        );
        assert_eq!(
            registry
                .app_name("00000000-0000-0000-0000-000000000000")
                .unwrap(),
            "Default Garmin Field"
        );
        assert!(registry.app_name("garbage").is_err());
        assert_eq!(registry.providers().count(), 3);
    }
}
