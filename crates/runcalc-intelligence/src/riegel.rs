// ABOUTME: Riegel power-law race time scaling between distances
// ABOUTME: T2 = T1 x (D2/D1)^1.06, also used to normalize inputs onto model reference distances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Riegel endurance model
//!
//! Reference: Riegel, P.S. (1981). "Athletic records and human endurance."
//! *American Scientist*, 69(3), 285-290.

use runcalc_core::constants::riegel::FATIGUE_EXPONENT;

/// Predict time in seconds for `target_meters` from a known performance
///
/// ```
/// use runcalc_intelligence::riegel::predict_time;
/// let seconds = predict_time(5000.0, 1500.0, 10_000.0);
/// assert!((seconds - 3127.4).abs() < 0.05);
/// ```
#[must_use]
pub fn predict_time(known_meters: f64, known_seconds: f64, target_meters: f64) -> f64 {
    known_seconds * (target_meters / known_meters).powf(FATIGUE_EXPONENT)
}

/// Project a performance onto `target_meters`
///
/// Returns `time_seconds` untouched when the distances are equal so that
/// normalization never perturbs an exact match.
#[must_use]
pub fn normalize_time(distance_meters: f64, time_seconds: f64, target_meters: f64) -> f64 {
    if (distance_meters - target_meters).abs() < f64::EPSILON {
        time_seconds
    } else {
        predict_time(distance_meters, time_seconds, target_meters)
    }
}
