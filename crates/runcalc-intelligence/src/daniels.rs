// ABOUTME: Jack Daniels' VDOT model: capacity from a race, paces from capacity, race prediction
// ABOUTME: Includes slow-runner adjustments and the fixed 3-step Newton marathon velocity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Jack Daniels' closed-form running model
//!
//! # Formulas
//!
//! - Oxygen cost: `VO2 = -4.60 + 0.182258 v + 0.000104 v²` (v in m/min)
//! - Sustainable fraction: `0.8 + 0.1894393 e^(-0.012778 t) + 0.2989558 e^(-0.1932605 t)` (t in min)
//! - VDOT: `VO2 / fraction`
//! - Velocity from VDOT: `29.54 + 5.000663 x - 0.007546 x²`
//!
//! # Scientific References
//!
//! - Daniels, J. & Gilbert, J. (1979). Oxygen Power: Performance Tables for Distance Runners
//! - Daniels, J. (2013). "Daniels' Running Formula" (3rd ed.). Human Kinetics.
//!
//! Functions here do not bounds-check; callers validate inputs.

use runcalc_core::constants::daniels::{
    marathon, EASY_EFFORT, EASY_SLOW_EFFORT, INTERVAL_EFFORT, MARATHON_METERS,
    MARATHON_NEWTON_ITERATIONS, MAX_FRACTION_BASE, MAX_FRACTION_FAST_AMPLITUDE,
    MAX_FRACTION_FAST_RATE, MAX_FRACTION_SLOW_AMPLITUDE, MAX_FRACTION_SLOW_RATE, RACE_EFFORT,
    REPETITION_CORRECTION_METERS, REPETITION_CORRECTION_SECONDS_PER_400M, SLOW_RUNNER_OFFSET,
    SLOW_RUNNER_SCALE, SLOW_RUNNER_THRESHOLD, THRESHOLD_EFFORT, VELOCITY_A, VELOCITY_B,
    VELOCITY_C, VO2_COST_A, VO2_COST_B, VO2_COST_C,
};
use runcalc_core::constants::units::{METERS_PER_KM, SECONDS_PER_MINUTE};
use serde::{Deserialize, Serialize};

/// Which end of the easy-pace range to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasyVariant {
    /// 70% effort, the faster end of the easy range
    Standard,
    /// 62% effort, the slower end of the easy range
    Slower,
}

impl EasyVariant {
    /// Effort fraction applied to the (possibly adjusted) capacity
    #[must_use]
    pub const fn effort(self) -> f64 {
        match self {
            Self::Standard => EASY_EFFORT,
            Self::Slower => EASY_SLOW_EFFORT,
        }
    }
}

/// Daniels training paces for one kilometer, in decimal minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingPaces {
    /// Faster end of the easy range (70% effort)
    pub easy_lower: f64,
    /// Slower end of the easy range (62% effort)
    pub easy_upper: f64,
    /// Marathon pace from the iterative marathon velocity
    pub marathon: f64,
    /// Threshold pace (88% effort)
    pub threshold: f64,
    /// Interval pace (97.5% effort)
    pub interval: f64,
    /// Repetition pace (interval minus 6 s per 400m)
    pub repetition: f64,
}

/// Jack Daniels' VDOT model
pub struct DanielsModel;

impl DanielsModel {
    /// Estimate VDOT from a race performance
    ///
    /// # Arguments
    ///
    /// * `distance_meters` - Race distance in meters
    /// * `time_seconds` - Race time in seconds
    ///
    /// ```
    /// use runcalc_intelligence::daniels::DanielsModel;
    /// let vdot = DanielsModel::estimate_capacity(5000.0, 1500.0);
    /// assert!((vdot - 38.3).abs() < 0.05);
    /// ```
    #[must_use]
    pub fn estimate_capacity(distance_meters: f64, time_seconds: f64) -> f64 {
        let minutes = time_seconds / SECONDS_PER_MINUTE;
        let velocity = distance_meters / minutes;
        let vo2 = (VO2_COST_A * velocity).mul_add(velocity, VO2_COST_B.mul_add(velocity, VO2_COST_C));
        let max_fraction = MAX_FRACTION_FAST_AMPLITUDE.mul_add(
            (MAX_FRACTION_FAST_RATE * minutes).exp(),
            MAX_FRACTION_SLOW_AMPLITUDE.mul_add((MAX_FRACTION_SLOW_RATE * minutes).exp(), MAX_FRACTION_BASE),
        );
        vo2 / max_fraction
    }

    /// Running velocity (m/min) sustained at the given VDOT
    #[must_use]
    pub fn velocity_from_capacity(vdot: f64) -> f64 {
        (VELOCITY_A * vdot).mul_add(vdot, VELOCITY_B.mul_add(vdot, VELOCITY_C))
    }

    /// Minutes needed to cover `distance_meters` at `effort` fraction of VDOT
    #[must_use]
    pub fn pace_for_effort(vdot: f64, distance_meters: f64, effort: f64) -> f64 {
        distance_meters / Self::velocity_from_capacity(vdot * effort)
    }

    /// True when the runner gets slow-runner adjusted training paces
    #[must_use]
    pub fn is_slow_runner(vdot: f64) -> bool {
        vdot > 0.0 && vdot < SLOW_RUNNER_THRESHOLD
    }

    /// Slow-runner adjusted VDOT: `vdot * 2/3 + 13`
    #[must_use]
    pub fn slow_runner_capacity(vdot: f64) -> f64 {
        vdot.mul_add(SLOW_RUNNER_SCALE, SLOW_RUNNER_OFFSET)
    }

    /// Easy pace in minutes for the distance
    #[must_use]
    pub fn easy_pace(vdot: f64, distance_meters: f64, variant: EasyVariant) -> f64 {
        let capacity = if Self::is_slow_runner(vdot) {
            Self::slow_runner_capacity(vdot)
        } else {
            vdot
        };
        Self::pace_for_effort(capacity, distance_meters, variant.effort())
    }

    /// Threshold pace in minutes; slow runners use the mean of raw and adjusted VDOT
    #[must_use]
    pub fn threshold_pace(vdot: f64, distance_meters: f64) -> f64 {
        let capacity = if Self::is_slow_runner(vdot) {
            (Self::slow_runner_capacity(vdot) + vdot) / 2.0
        } else {
            vdot
        };
        Self::pace_for_effort(capacity, distance_meters, THRESHOLD_EFFORT)
    }

    /// Interval pace in minutes
    #[must_use]
    pub fn interval_pace(vdot: f64, distance_meters: f64) -> f64 {
        let capacity = if Self::is_slow_runner(vdot) {
            Self::slow_runner_capacity(vdot)
        } else {
            vdot
        };
        Self::pace_for_effort(capacity, distance_meters, INTERVAL_EFFORT)
    }

    /// Repetition pace in minutes: interval pace less 6 s per 400m
    #[must_use]
    pub fn repetition_pace(vdot: f64, distance_meters: f64) -> f64 {
        let correction = distance_meters / REPETITION_CORRECTION_METERS
            * (REPETITION_CORRECTION_SECONDS_PER_400M / SECONDS_PER_MINUTE);
        Self::interval_pace(vdot, distance_meters) - correction
    }

    /// Marathon velocity (m/min) refined by exactly three Newton steps
    ///
    /// The step count is fixed rather than convergence-driven so results
    /// match the published tables.
    #[must_use]
    pub fn marathon_velocity(vdot: f64) -> f64 {
        let mut time = MARATHON_METERS / (marathon::INITIAL_GUESS_DIVISOR * vdot);

        for _ in 0..MARATHON_NEWTON_ITERATIONS {
            let fast = (-marathon::FAST_RATE * time).exp();
            let slow = (marathon::SLOW_RATE * time).exp();
            let correction = marathon::FAST_AMPLITUDE.mul_add(
                fast,
                slow.mul_add(marathon::SLOW_AMPLITUDE, marathon::BASE),
            );
            let scaled = vdot * correction;
            let velocity = (scaled * scaled).mul_add(
                marathon::VELOCITY_A,
                scaled.mul_add(marathon::VELOCITY_B, marathon::VELOCITY_C),
            );

            let d1 = marathon::FAST_AMPLITUDE * fast * marathon::FAST_RATE_DERIVATIVE;
            let d2 = d1 - slow * marathon::SLOW_AMPLITUDE * marathon::SLOW_RATE;
            let d3 = correction * d2 * vdot * marathon::VELOCITY_A_DERIVATIVE * 3.0;
            let d4 = (d2 * vdot).mul_add(marathon::VELOCITY_B, d3);
            let d5 = MARATHON_METERS * d4 / (velocity * velocity) + 1.0;

            time -= (time - MARATHON_METERS / velocity) / d5;
        }

        MARATHON_METERS / time
    }

    /// Marathon pace in minutes for the distance
    #[must_use]
    pub fn marathon_pace(vdot: f64, distance_meters: f64) -> f64 {
        distance_meters / Self::marathon_velocity(vdot)
    }

    /// Predict race time in seconds for `target_meters` from a known performance
    ///
    /// ```
    /// use runcalc_intelligence::daniels::DanielsModel;
    /// let seconds = DanielsModel::predict_time(5000.0, 1500.0, 10_000.0);
    /// assert!((seconds - 2856.6).abs() < 0.1);
    /// ```
    #[must_use]
    pub fn predict_time(known_meters: f64, known_seconds: f64, target_meters: f64) -> f64 {
        let vdot = Self::estimate_capacity(known_meters, known_seconds);
        Self::pace_for_effort(vdot, target_meters, RACE_EFFORT) * SECONDS_PER_MINUTE
    }

    /// All training paces for one kilometer
    #[must_use]
    pub fn training_paces(vdot: f64) -> TrainingPaces {
        TrainingPaces {
            easy_lower: Self::easy_pace(vdot, METERS_PER_KM, EasyVariant::Standard),
            easy_upper: Self::easy_pace(vdot, METERS_PER_KM, EasyVariant::Slower),
            marathon: Self::marathon_pace(vdot, METERS_PER_KM),
            threshold: Self::threshold_pace(vdot, METERS_PER_KM),
            interval: Self::interval_pace(vdot, METERS_PER_KM),
            repetition: Self::repetition_pace(vdot, METERS_PER_KM),
        }
    }
}
