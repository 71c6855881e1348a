// ABOUTME: Catalog of StrydZones Connect IQ developer fields
// ABOUTME: Footpod power, form and air power, leg spring stiffness and environment fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rwd_core::constants::metric_names::POWER;
use rwd_core::constants::providers::{STRYD_ZONES_APP_ID, STRYD_ZONES_AUTHOR, STRYD_ZONES_NAME};
use rwd_core::models::Metric;

use crate::catalog::ProviderDefinition;

/// StrydZones catalog (field numbers 0, 8, 9, 11, 15, 16, 24, 30, 31, 32)
#[must_use]
pub fn stryd_zones() -> ProviderDefinition {
    ProviderDefinition::builtin(
        STRYD_ZONES_NAME,
        STRYD_ZONES_APP_ID,
        STRYD_ZONES_AUTHOR,
        vec![
            Metric::developer("Vertical Oscillation Balance", "Centimeters", "", 32),
            Metric::developer(
                "Form Power",
                "Watts",
                "Form Power is an additional component of running power relating to vertical \
                 oscillation and cadence. It is also weight-dependent.",
                8,
            ),
            Metric::developer(
                "Air Power",
                "Watts",
                "The cost of overcoming air resistance into the total power value in real-time.",
                11,
            ),
            Metric::developer("Temperature", "°C", "Run temperature", 16),
            Metric::developer("Impact Loading Rate Balance", "%", "", 30),
            Metric::developer(POWER, "Watts", "Running power", 0),
            Metric::developer(
                "Leg Spring Stiffness",
                "kN/m",
                "Leg Spring Stiffness (LSS) is a model of elastic energy in the leg, assuming it \
                 acts like a spring.",
                9,
            ),
            Metric::developer("Humidity", "%", "Humidity", 15),
            Metric::developer(
                "Impact Loading Rate",
                "bw/sec",
                "The initial rate of increase in vertical force as a runner contacts the ground, \
                 in body weight per second.",
                24,
            ),
            Metric::developer("Leg Spring Stiffness Balance", "%", "", 31),
        ],
    )
}
