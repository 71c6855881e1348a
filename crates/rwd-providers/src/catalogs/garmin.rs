// ABOUTME: Catalog of native Garmin device fields keyed by detail descriptor key
// ABOUTME: Position, speed, power, heart rate, running dynamics and timestamp channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rwd_core::constants::fields::{LATITUDE_KEY, LONGITUDE_KEY, SPEED_KEY, TIMESTAMP_KEY};
use rwd_core::constants::metric_names::{LATITUDE, LONGITUDE, POWER, SPEED, TIMESTAMP};
use rwd_core::constants::providers::{GARMIN_AUTHOR, GARMIN_NATIVE_APP_ID, GARMIN_NATIVE_NAME};
use rwd_core::models::Metric;

use crate::catalog::ProviderDefinition;

/// Native field catalog (18 metrics)
#[must_use]
pub fn garmin_default_fields() -> ProviderDefinition {
    ProviderDefinition::builtin(
        GARMIN_NATIVE_NAME,
        GARMIN_NATIVE_APP_ID,
        GARMIN_AUTHOR,
        vec![
            Metric::native(LONGITUDE, "degree", "GPS longitude", LONGITUDE_KEY),
            Metric::native(LATITUDE, "degree", "GPS latitude", LATITUDE_KEY),
            Metric::native(
                "Cadence",
                "spm",
                "Number of steps per minutes",
                "directDoubleCadence",
            ),
            Metric::native("Stride Length", "cm", "Stride length", "directStrideLength"),
            Metric::native(SPEED, "mps", "Running speed in mps", SPEED_KEY),
            Metric::native(
                "Grade Adjusted Speed",
                "mps",
                "Grade adjusted running speed (adjusted from elevation) in mps",
                "directGradeAdjustedSpeed",
            ),
            Metric::native(
                POWER,
                "Watt",
                "Running power measured by Garmin",
                "directPower",
            ),
            Metric::native(
                "Heart Rate",
                "bpm",
                "Measured heart rate from Garmin",
                "directHeartRate",
            ),
            Metric::native(
                TIMESTAMP,
                "milli epoch time",
                "UNIX timestamp in milli epoch. Divide by 1000 to convert to second.",
                TIMESTAMP_KEY,
            ),
            Metric::native(
                "Moving Duration",
                "second",
                "Run moving duration",
                "sumMovingDuration",
            ),
            Metric::native("Total Distance", "meter", "Total run distance", "sumDistance"),
            Metric::native(
                "Vertical Speed",
                "mps",
                "Vertical speed",
                "directVerticalSpeed",
            ),
            Metric::native(
                "Vertical Oscillation",
                "cm",
                "Vertical oscillation",
                "directVerticalOscillation",
            ),
            Metric::native(
                "Vertical Ratio",
                "%",
                "Vertical oscillation to stride length ratio",
                "directVerticalRatio",
            ),
            Metric::native(
                "Ground Contact Time",
                "ms",
                "Ground contact time",
                "directGroundContactTime",
            ),
            Metric::native(
                "Ground Contact Balance",
                "%",
                "Ground contact time left percentage. (You can get right by subtract from 100)",
                "directGroundContactBalanceLeft",
            ),
            Metric::native(
                "Respiration Rate",
                "bpm",
                "Number of breaths per minute",
                "directRespirationRate",
            ),
            Metric::native("Elevation", "m", "Elevation", "directElevation"),
        ],
    )
}
