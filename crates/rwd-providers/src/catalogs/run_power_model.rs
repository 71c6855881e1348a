// ABOUTME: Catalog of RunPowerModel Connect IQ developer fields
// ABOUTME: Wrist-based running power plus trail and running scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rwd_core::constants::metric_names::RUNNING_POWER;
use rwd_core::constants::providers::{
    RUN_POWER_MODEL_APP_ID, RUN_POWER_MODEL_AUTHOR, RUN_POWER_MODEL_NAME,
};
use rwd_core::models::Metric;

use crate::catalog::ProviderDefinition;

/// RunPowerModel catalog (field numbers 0, 1, 2)
#[must_use]
pub fn run_power_model() -> ProviderDefinition {
    ProviderDefinition::builtin(
        RUN_POWER_MODEL_NAME,
        RUN_POWER_MODEL_APP_ID,
        RUN_POWER_MODEL_AUTHOR,
        vec![
            Metric::developer(RUNNING_POWER, "Watt", "Running power", 0),
            Metric::developer("Trail Score", "%", "Trail score", 1),
            Metric::developer("Running Score", "%", "Running score", 2),
        ],
    )
}
