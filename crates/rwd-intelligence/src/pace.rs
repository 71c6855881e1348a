// ABOUTME: Running pace (minutes and seconds per kilometer or mile) from and to meters per second
// ABOUTME: Pace is truncated to whole seconds and formatted as MM:SS min/km
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use rwd_core::errors::{TelemetryError, TelemetryResult};
use serde::{Deserialize, Serialize};

/// Meters per mile
const METERS_PER_MILE: f64 = 1_609.344;

/// Tolerance absorbing float noise before truncating to whole seconds
const SECONDS_EPSILON: f64 = 1e-6;

/// Distance unit a pace is expressed against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Minutes per kilometer
    #[default]
    Km,
    /// Minutes per mile
    Mi,
}

impl DistanceUnit {
    /// Length of the unit in meters
    #[must_use]
    pub const fn meters(self) -> f64 {
        match self {
            Self::Km => 1_000.0,
            Self::Mi => METERS_PER_MILE,
        }
    }

    /// Short label used in formatting
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Km => "km",
            Self::Mi => "mi",
        }
    }
}

/// Time needed to cover one distance unit
///
/// The default value is the zero pace, which converts to a speed of 0 m/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    minutes: u32,
    seconds: u32,
    unit: DistanceUnit,
}

impl Pace {
    /// Create a pace
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Validation` if `seconds` is 60 or more.
    pub fn new(minutes: u32, seconds: u32, unit: DistanceUnit) -> TelemetryResult<Self> {
        if seconds >= 60 {
            return Err(TelemetryError::validation(format!(
                "pace seconds must be below 60, got {seconds}"
            )));
        }
        Ok(Self {
            minutes,
            seconds,
            unit,
        })
    }

    /// Pace for a speed in meters per second, `None` when not moving
    #[must_use]
    pub fn from_mps(mps: f64, unit: DistanceUnit) -> Option<Self> {
        if !mps.is_finite() || mps <= 0.0 {
            return None;
        }
        let total = (unit.meters() / mps + SECONDS_EPSILON).floor();
        if total > f64::from(u32::MAX) {
            return None;
        }
        let total = total as u32;
        Some(Self {
            minutes: total / 60,
            seconds: total % 60,
            unit,
        })
    }

    /// Speed in meters per second (0 for the zero pace)
    #[must_use]
    pub fn to_mps(&self) -> f64 {
        match self.total_seconds() {
            0 => 0.0,
            total => self.unit.meters() / f64::from(total),
        }
    }

    /// Whole minutes
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Remaining seconds
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Distance unit
    #[must_use]
    pub const fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Pace in seconds per unit
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} min/{}",
            self.minutes,
            self.seconds,
            self.unit.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paces() {
        let pace = Pace::from_mps(2.5, DistanceUnit::Km).unwrap();
        assert_eq!((pace.minutes(), pace.seconds()), (6, 40));
        assert_eq!(pace.to_string(), "06:40 min/km");

        let pace = Pace::from_mps(3.0, DistanceUnit::Km).unwrap();
        assert_eq!((pace.minutes(), pace.seconds()), (5, 33));

        let pace = Pace::from_mps(1_000.0 / 300.0, DistanceUnit::Km).unwrap();
        assert_eq!(pace.to_string(), "05:00 min/km");

        let pace = Pace::from_mps(METERS_PER_MILE / 480.0, DistanceUnit::Mi).unwrap();
        assert_eq!(pace.to_string(), "08:00 min/mi");
    }

    #[test]
    fn test_round_trip() {
        let pace = Pace::new(4, 10, DistanceUnit::Km).unwrap();
        assert!((pace.to_mps() - 4.0).abs() < 1e-9);
        assert_eq!(Pace::from_mps(pace.to_mps(), DistanceUnit::Km), Some(pace));
    }

    #[test]
    fn test_not_moving() {
        assert_eq!(Pace::from_mps(0.0, DistanceUnit::Km), None);
        assert_eq!(Pace::from_mps(-1.0, DistanceUnit::Km), None);
        assert_eq!(Pace::from_mps(f64::NAN, DistanceUnit::Km), None);

        let zero = Pace::from_mps(0.0, DistanceUnit::Km).unwrap_or_default();
        assert!(zero.to_mps().abs() < f64::EPSILON);
        assert_eq!(zero.to_string(), "00:00 min/km");
    }

    #[test]
    fn test_invalid_seconds() {
        assert!(Pace::new(5, 60, DistanceUnit::Km).is_err());
    }
}
