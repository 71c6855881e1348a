// ABOUTME: Built-in metric catalogs for the native device and the supported Connect IQ apps
// ABOUTME: Garmin default fields, StrydZones and RunPowerModel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Native device fields
pub mod garmin;
/// RunPowerModel wrist power app
pub mod run_power_model;
/// Stryd footpod app
pub mod stryd_zones;

pub use garmin::garmin_default_fields;
pub use run_power_model::run_power_model;
pub use stryd_zones::stryd_zones;
