// ABOUTME: Pace and speed unit conversions between min/km, min/mile, km/h, and mph
// ABOUTME: Typed unit enum, 0-2 step conversion chains, and M:SS pace-string parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Unit conversions
//!
//! Pace units are minutes per distance; speed units are distance per hour.
//! Pace and speed are reciprocals (`speed = 60 / pace`), so every step that
//! crosses between them rejects non-positive input. Composite conversions are
//! expressed as a chain of at most two primitive steps.

use std::fmt;
use std::str::FromStr;

use runcalc_core::constants::units::{KM_PER_MILE, MINUTES_PER_HOUR};
use runcalc_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Supported pace and speed units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaceUnit {
    /// Minutes per kilometer
    #[serde(rename = "min_km")]
    MinPerKm,
    /// Minutes per mile
    #[serde(rename = "min_mile")]
    MinPerMile,
    /// Kilometers per hour
    #[serde(rename = "kmh")]
    Kmh,
    /// Miles per hour
    #[serde(rename = "mph")]
    Mph,
}

impl PaceUnit {
    /// All units in canonical order
    pub const ALL: [Self; 4] = [Self::MinPerKm, Self::MinPerMile, Self::Kmh, Self::Mph];

    /// Wire name of the unit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinPerKm => "min_km",
            Self::MinPerMile => "min_mile",
            Self::Kmh => "kmh",
            Self::Mph => "mph",
        }
    }

    /// True for minute-per-distance units
    #[must_use]
    pub const fn is_pace(self) -> bool {
        matches!(self, Self::MinPerKm | Self::MinPerMile)
    }
}

impl fmt::Display for PaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaceUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Invalid unit '{s}'. Must be one of: min_km, min_mile, kmh, mph"
                ))
            })
    }
}

/// A single primitive conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStep {
    /// min/km to min/mile
    PaceKmToPaceMile,
    /// min/mile to min/km
    PaceMileToPaceKm,
    /// min/km to km/h
    PaceKmToKmh,
    /// km/h to min/km
    KmhToPaceKm,
    /// min/mile to mph
    PaceMileToMph,
    /// mph to min/mile
    MphToPaceMile,
    /// km/h to mph
    KmhToMph,
    /// mph to km/h
    MphToKmh,
}

impl ConversionStep {
    /// Apply this step to a value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a pace/speed reciprocal step receives a
    /// non-positive value
    pub fn apply(self, value: f64) -> AppResult<f64> {
        match self {
            Self::PaceKmToPaceMile => Ok(value * KM_PER_MILE),
            Self::PaceMileToPaceKm => Ok(value / KM_PER_MILE),
            Self::KmhToMph => Ok(value / KM_PER_MILE),
            Self::MphToKmh => Ok(value * KM_PER_MILE),
            Self::PaceKmToKmh | Self::PaceMileToMph => reciprocal(value, "Pace"),
            Self::KmhToPaceKm | Self::MphToPaceMile => reciprocal(value, "Speed"),
        }
    }
}

fn reciprocal(value: f64, quantity: &str) -> AppResult<f64> {
    if value <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "{quantity} must be a positive value"
        )));
    }
    Ok(MINUTES_PER_HOUR / value)
}

/// Ordered steps converting `from` into `to`; empty for same-unit conversion
#[must_use]
pub const fn conversion_chain(from: PaceUnit, to: PaceUnit) -> &'static [ConversionStep] {
    use ConversionStep::{
        KmhToMph, KmhToPaceKm, MphToKmh, MphToPaceMile, PaceKmToKmh, PaceKmToPaceMile,
        PaceMileToMph, PaceMileToPaceKm,
    };
    use PaceUnit::{Kmh, MinPerKm, MinPerMile, Mph};

    match (from, to) {
        (MinPerKm, MinPerKm) | (MinPerMile, MinPerMile) | (Kmh, Kmh) | (Mph, Mph) => &[],
        (MinPerKm, MinPerMile) => &[PaceKmToPaceMile],
        (MinPerKm, Kmh) => &[PaceKmToKmh],
        (MinPerKm, Mph) => &[PaceKmToKmh, KmhToMph],
        (MinPerMile, MinPerKm) => &[PaceMileToPaceKm],
        (MinPerMile, Mph) => &[PaceMileToMph],
        (MinPerMile, Kmh) => &[PaceMileToMph, MphToKmh],
        (Kmh, Mph) => &[KmhToMph],
        (Kmh, MinPerKm) => &[KmhToPaceKm],
        (Kmh, MinPerMile) => &[KmhToMph, MphToPaceMile],
        (Mph, Kmh) => &[MphToKmh],
        (Mph, MinPerMile) => &[MphToPaceMile],
        (Mph, MinPerKm) => &[MphToKmh, KmhToPaceKm],
    }
}

/// Convert a pace or speed value between units
///
/// # Errors
///
/// Returns `InvalidInput` if any reciprocal step in the chain receives a
/// non-positive value
pub fn convert(value: f64, from: PaceUnit, to: PaceUnit) -> AppResult<f64> {
    conversion_chain(from, to)
        .iter()
        .try_fold(value, |acc, step| step.apply(acc))
}

/// Parse an `M:SS` or `MM:SS` pace string into decimal minutes
///
/// # Errors
///
/// Returns `InvalidFormat` if the string has no colon, more than one colon,
/// non-integer or negative parts, or seconds of 60 or more
pub fn parse_pace_string(pace: &str) -> AppResult<f64> {
    let invalid = |reason: &str| {
        AppError::invalid_format(format!("Invalid pace format '{pace}': {reason}"))
    };

    let mut parts = pace.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("Pace must be in M:SS or MM:SS format"));
    };

    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| invalid("minutes must be a whole number"))?;
    let seconds: u32 = seconds
        .trim()
        .parse()
        .map_err(|_| invalid("seconds must be a whole number"))?;

    if seconds >= 60 {
        return Err(invalid("Seconds must be less than 60"));
    }

    Ok(f64::from(minutes) + f64::from(seconds) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_unit_chain_is_empty() {
        for unit in PaceUnit::ALL {
            assert!(conversion_chain(unit, unit).is_empty());
        }
    }

    #[test]
    fn test_every_chain_has_at_most_two_steps() {
        for from in PaceUnit::ALL {
            for to in PaceUnit::ALL {
                assert!(conversion_chain(from, to).len() <= 2);
            }
        }
    }

    #[test]
    fn test_pace_string_without_colon_fails() {
        assert!(parse_pace_string("530").is_err());
    }
}
