// ABOUTME: Fitted-model prediction engine: nearest reference distance, Riegel normalization, evaluation
// ABOUTME: Velocity markers (vLT, CV, vVO2) and catalog-wide race time predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Fitted-model predictions
//!
//! A performance `(distance, time)` is projected with Riegel's law onto the
//! closest distance for which the table has models, then the model for the
//! requested metric is evaluated at the projected time.

use std::fmt;

use runcalc_core::errors::{AppError, AppResult};
use runcalc_core::formatters::format_hhmmss;
use runcalc_core::race_catalog::RACE_DISTANCES;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ModelCategory, ModelManager, ModelSpec};
use crate::riegel;
use crate::validation::ValidationLimits;

/// Model-predicted sustainable-pace thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityMarker {
    /// Velocity at lactate threshold
    #[serde(rename = "vLT")]
    Vlt,
    /// Critical velocity
    #[serde(rename = "CV")]
    Cv,
    /// Velocity at VO2max
    #[serde(rename = "vVO2")]
    Vvo2,
}

impl VelocityMarker {
    /// All markers in output order
    pub const ALL: [Self; 3] = [Self::Vlt, Self::Cv, Self::Vvo2];

    /// Model key in the `velocity_markers` category
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Vlt => "vLT",
            Self::Cv => "CV",
            Self::Vvo2 => "vVO2",
        }
    }

    /// Human description of the marker
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Vlt => "Lactate Threshold Pace (vLT)",
            Self::Cv => "Critical Velocity Pace (CV)",
            Self::Vvo2 => "VO2Max Pace (vVO2Max)",
        }
    }
}

impl fmt::Display for VelocityMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Check a performance against the plausibility limits
///
/// # Errors
///
/// Returns `InvalidInput` describing the first violated limit
pub fn validate_performance(
    distance_meters: f64,
    time_seconds: f64,
    limits: &ValidationLimits,
) -> AppResult<()> {
    limits.check(distance_meters, time_seconds)
}

/// Reference distance closest to `distance_meters`; ties prefer the smaller distance
#[must_use]
pub fn nearest_reference_distance(available: &[u32], distance_meters: f64) -> Option<u32> {
    available.iter().copied().min_by(|a, b| {
        let gap_a = (f64::from(*a) - distance_meters).abs();
        let gap_b = (f64::from(*b) - distance_meters).abs();
        gap_a.total_cmp(&gap_b).then(a.cmp(b))
    })
}

/// Project a performance onto the nearest reference distance
///
/// # Errors
///
/// Returns `ModelNotFound` if `available` is empty
pub fn normalize_to_reference(
    available: &[u32],
    distance_meters: f64,
    time_seconds: f64,
) -> AppResult<(u32, f64)> {
    let reference = nearest_reference_distance(available, distance_meters)
        .ok_or_else(|| AppError::model_not_found("No reference distances available"))?;
    let time = riegel::normalize_time(distance_meters, time_seconds, f64::from(reference));
    Ok((reference, time))
}

/// Evaluate a model record at `input_time`
///
/// # Errors
///
/// Returns `PredictionFailed` if the record is malformed or the result is not finite
pub fn evaluate_model(input_time: f64, model: &ModelSpec) -> AppResult<f64> {
    model.predict(input_time)
}

/// Fitted-model predictions over a shared model table
#[derive(Debug, Clone, Copy)]
pub struct FittedModelEngine<'a> {
    pub(crate) models: &'a ModelManager,
    pub(crate) limits: ValidationLimits,
}

impl<'a> FittedModelEngine<'a> {
    /// Engine reading from `models` and validating with `limits`
    #[must_use]
    pub const fn new(models: &'a ModelManager, limits: ValidationLimits) -> Self {
        Self { models, limits }
    }

    /// Validation limits applied before any model is consulted
    #[must_use]
    pub const fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Predict one velocity marker in seconds per km, rounded half-to-even
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for implausible performances, `ModelNotFound`
    /// if the table lacks the marker, `PredictionFailed` if evaluation fails,
    /// or `ModelLoadingFailed` if the table cannot be loaded
    pub fn predict_velocity_marker(
        &self,
        distance_meters: f64,
        time_seconds: f64,
        marker: VelocityMarker,
    ) -> AppResult<i64> {
        validate_performance(distance_meters, time_seconds, &self.limits)?;

        let available = self.models.available_distances(ModelCategory::VelocityMarkers)?;
        let (reference, time) = normalize_to_reference(&available, distance_meters, time_seconds)?;
        let model = self
            .models
            .get_model(ModelCategory::VelocityMarkers, reference, marker.key())?;
        let seconds_per_km = evaluate_model(time, &model).map_err(|error| {
            AppError::prediction(format!("Failed to predict {marker} using model."))
                .with_context(error.message)
        })?;

        Ok(seconds_per_km.round_ties_even() as i64)
    }

    /// All three velocity markers in output order
    ///
    /// # Errors
    ///
    /// Fails on the first marker that cannot be predicted
    pub fn velocity_markers(
        &self,
        distance_meters: f64,
        time_seconds: f64,
    ) -> AppResult<Vec<(VelocityMarker, i64)>> {
        VelocityMarker::ALL
            .into_iter()
            .map(|marker| {
                self.predict_velocity_marker(distance_meters, time_seconds, marker)
                    .map(|value| (marker, value))
            })
            .collect()
    }

    /// Predict every catalog race, in catalog order, as `HH:MM:SS`
    ///
    /// The race matching the truncated input distance echoes the input time.
    /// Races without a usable model are left out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for implausible performances or
    /// `ModelLoadingFailed` if the table cannot be loaded
    pub fn predict_all_race_times(
        &self,
        distance_meters: f64,
        time_seconds: f64,
    ) -> AppResult<Vec<(String, String)>> {
        validate_performance(distance_meters, time_seconds, &self.limits)?;

        let available = self.models.available_distances(ModelCategory::RaceTimes)?;
        let (reference, time) = normalize_to_reference(&available, distance_meters, time_seconds)?;
        let raced_meters = distance_meters.trunc() as u32;

        let predictions = RACE_DISTANCES
            .iter()
            .filter_map(|&(race, meters)| {
                if meters == raced_meters {
                    return Some((race.to_owned(), format_hhmmss(time_seconds)));
                }
                self.models
                    .get_model(ModelCategory::RaceTimes, reference, race)
                    .and_then(|model| evaluate_model(time, &model))
                    .map(|seconds| (race.to_owned(), format_hhmmss(seconds)))
                    .inspect_err(|error| {
                        debug!(race, reference, error = %error, "Skipping race without usable model");
                    })
                    .ok()
            })
            .collect();

        Ok(predictions)
    }
}
