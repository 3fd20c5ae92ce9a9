// ABOUTME: Plausibility checks applied to a race performance before any fitted model runs
// ABOUTME: Configurable distance and pace limits with ordered, human-readable failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Shared input validation for fitted-model predictions

use runcalc_core::constants::units::{KM_PER_MILE, METERS_PER_KM};
use runcalc_core::constants::validation::{
    MAX_DISTANCE_METERS, MAX_PACE_SECONDS_PER_KM, MIN_DISTANCE_METERS, MIN_PACE_SECONDS_PER_KM,
};
use runcalc_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Bounds a performance must satisfy to be fed to a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Shortest accepted distance (meters)
    pub min_distance_meters: f64,
    /// Longest accepted distance (meters)
    pub max_distance_meters: f64,
    /// Fastest accepted pace (seconds per km)
    pub min_pace_seconds_per_km: f64,
    /// Slowest accepted pace (seconds per km)
    pub max_pace_seconds_per_km: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_distance_meters: MIN_DISTANCE_METERS,
            max_distance_meters: MAX_DISTANCE_METERS,
            min_pace_seconds_per_km: MIN_PACE_SECONDS_PER_KM,
            max_pace_seconds_per_km: MAX_PACE_SECONDS_PER_KM,
        }
    }
}

impl ValidationLimits {
    /// Check that each range is non-empty and positive
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the inconsistent pair
    pub fn validate(&self) -> AppResult<()> {
        if self.min_distance_meters <= 0.0 || self.min_pace_seconds_per_km <= 0.0 {
            return Err(AppError::config("Validation limits must be positive"));
        }
        if self.min_distance_meters >= self.max_distance_meters {
            return Err(AppError::config(format!(
                "Minimum distance {} must be below maximum distance {}",
                self.min_distance_meters, self.max_distance_meters
            )));
        }
        if self.min_pace_seconds_per_km >= self.max_pace_seconds_per_km {
            return Err(AppError::config(format!(
                "Minimum pace {} must be below maximum pace {}",
                self.min_pace_seconds_per_km, self.max_pace_seconds_per_km
            )));
        }
        Ok(())
    }

    /// Check a performance, stopping at the first failure
    ///
    /// Order: distance positive, time positive, distance too short, distance
    /// too long, pace too fast, pace too slow.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first violated bound
    pub fn check(&self, distance_meters: f64, time_seconds: f64) -> AppResult<()> {
        if distance_meters <= 0.0 {
            return Err(AppError::invalid_input("Distance must be positive"));
        }
        if time_seconds <= 0.0 {
            return Err(AppError::invalid_input("Time must be positive"));
        }
        if distance_meters < self.min_distance_meters {
            return Err(AppError::invalid_input(format!(
                "Distance too short, must be at least {}m for meaningful calculations",
                self.min_distance_meters
            )));
        }
        if distance_meters > self.max_distance_meters {
            let miles = self.max_distance_meters / (KM_PER_MILE * METERS_PER_KM);
            return Err(AppError::invalid_input(format!(
                "Distance too long, must be less than {miles:.0} miles for this calculation method"
            )));
        }

        let pace_seconds_per_km = time_seconds / (distance_meters / METERS_PER_KM);
        if pace_seconds_per_km < self.min_pace_seconds_per_km {
            return Err(AppError::invalid_input(format!(
                "Pace appears unrealistically fast (faster than {}/km)",
                clock(self.min_pace_seconds_per_km)
            )));
        }
        if pace_seconds_per_km > self.max_pace_seconds_per_km {
            return Err(AppError::invalid_input(format!(
                "Pace appears unrealistically slow (slower than {}/km)",
                clock(self.max_pace_seconds_per_km)
            )));
        }
        Ok(())
    }
}

/// `M:SS` rendering of a pace limit
fn clock(seconds: f64) -> String {
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_messages() {
        let limits = ValidationLimits::default();
        let err = limits.check(1000.0, 59.0).unwrap_err();
        assert!(err.message.contains("faster than 1:00/km"));
        let err = limits.check(1000.0, 1201.0).unwrap_err();
        assert!(err.message.contains("slower than 20:00/km"));
        let err = limits.check(160_935.0, 50_000.0).unwrap_err();
        assert!(err.message.contains("less than 100 miles"));
        let err = limits.check(399.0, 120.0).unwrap_err();
        assert!(err.message.contains("at least 400m"));
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let limits = ValidationLimits {
            min_distance_meters: 5000.0,
            max_distance_meters: 400.0,
            ..ValidationLimits::default()
        };
        assert!(limits.validate().is_err());
    }
}
