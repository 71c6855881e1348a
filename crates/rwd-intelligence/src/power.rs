// ABOUTME: Locates the power channel of each competing provider inside a loaded activity
// ABOUTME: Garmin, Stryd and RunPowerModel power plus the timestamp slot, by metric position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rwd_core::constants::metric_names::{POWER, RUNNING_POWER, TIMESTAMP};
use rwd_core::models::Activity;
use serde::Serialize;

/// Provider family of a power channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSource {
    /// Power computed by the watch itself
    Garmin,
    /// Stryd footpod power
    Stryd,
    /// RunPowerModel wrist power
    RunPowerModel,
}

impl PowerSource {
    /// All sources in display order
    pub const ALL: [Self; 3] = [Self::Garmin, Self::Stryd, Self::RunPowerModel];

    /// Classify a power metric by the app that emitted it
    fn from_app_name(app_name: &str) -> Option<Self> {
        let app_name = app_name.to_lowercase();
        if app_name.contains("stryd") {
            Some(Self::Stryd)
        } else if app_name.contains("runpowermodel") {
            Some(Self::RunPowerModel)
        } else if app_name.contains("garmin") {
            Some(Self::Garmin)
        } else {
            None
        }
    }

    /// Short label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Garmin => "garmin",
            Self::Stryd => "stryd",
            Self::RunPowerModel => "runpowermodel",
        }
    }
}

/// Metric positions of the power channels in an activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PowerSources {
    /// Native power
    pub garmin: Option<usize>,
    /// Stryd power
    pub stryd: Option<usize>,
    /// RunPowerModel power
    pub run_power_model: Option<usize>,
    /// Timestamp metric
    pub timestamp: Option<usize>,
}

impl PowerSources {
    /// Find the power and timestamp slots of a loaded activity
    ///
    /// The first matching slot wins. An activity without loaded details has none.
    #[must_use]
    pub fn locate(activity: &Activity) -> Self {
        let mut sources = Self::default();
        let Some(slots) = activity.metrics() else {
            return sources;
        };

        for (position, metric) in slots
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_metric().map(|metric| (position, metric)))
        {
            let name = metric.name();
            if name.eq_ignore_ascii_case(TIMESTAMP) {
                sources.timestamp.get_or_insert(position);
            } else if name.eq_ignore_ascii_case(POWER) || name.eq_ignore_ascii_case(RUNNING_POWER) {
                if let Some(source) = PowerSource::from_app_name(metric.app_name()) {
                    sources.slot_mut(source).get_or_insert(position);
                }
            }
        }
        sources
    }

    /// Position of one source's power metric
    #[must_use]
    pub const fn get(&self, source: PowerSource) -> Option<usize> {
        match source {
            PowerSource::Garmin => self.garmin,
            PowerSource::Stryd => self.stryd,
            PowerSource::RunPowerModel => self.run_power_model,
        }
    }

    /// Sources present in the activity with their positions
    pub fn available(&self) -> impl Iterator<Item = (PowerSource, usize)> + '_ {
        PowerSource::ALL
            .into_iter()
            .filter_map(|source| self.get(source).map(|position| (source, position)))
    }

    fn slot_mut(&mut self, source: PowerSource) -> &mut Option<usize> {
        match source {
            PowerSource::Garmin => &mut self.garmin,
            PowerSource::Stryd => &mut self.stryd,
            PowerSource::RunPowerModel => &mut self.run_power_model,
        }
    }
}
