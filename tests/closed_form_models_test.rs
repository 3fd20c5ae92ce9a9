// ABOUTME: Verification tests for the closed-form Daniels VDOT model and Riegel scaling
// ABOUTME: Checks published reference values, slow-runner adjustments and formatted paces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use runcalc_core::formatters::{format_hhmmss, format_pace_rounded};
use runcalc_intelligence::{riegel, DanielsModel};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

// ============================================================================
// VDOT estimation
// ============================================================================

#[test]
fn test_vdot_for_25_minute_5k() {
    let vdot = DanielsModel::estimate_capacity(5000.0, 1500.0);
    assert_close(vdot, 38.3, 0.05);
}

#[test]
fn test_vdot_for_2_hour_marathon() {
    let vdot = DanielsModel::estimate_capacity(42_195.0, 7200.0);
    assert_close(vdot, 86.0, 0.05);
}

#[test]
fn test_faster_time_gives_higher_vdot() {
    let slower = DanielsModel::estimate_capacity(10_000.0, 3000.0);
    let faster = DanielsModel::estimate_capacity(10_000.0, 2400.0);
    assert!(faster > slower);
}

// ============================================================================
// Race prediction
// ============================================================================

#[test]
fn test_riegel_5k_to_10k() {
    let seconds = riegel::predict_time(5000.0, 1500.0, 10_000.0);
    assert_close(seconds, 3127.4, 0.05);
    assert_eq!(format_hhmmss(seconds), "00:52:07");
}

#[test]
fn test_riegel_same_distance_is_identity() {
    assert_close(riegel::normalize_time(5000.0, 1500.0, 5000.0), 1500.0, 1e-9);
}

#[test]
fn test_daniels_5k_to_10k() {
    let seconds = DanielsModel::predict_time(5000.0, 1500.0, 10_000.0);
    assert_close(seconds, 2856.6, 0.05);
    assert_eq!(format_hhmmss(seconds), "00:47:36");
}

// ============================================================================
// Training paces
// ============================================================================

#[test]
fn test_training_paces_vdot_50() {
    let paces = DanielsModel::training_paces(50.0);

    assert_eq!(format_pace_rounded(paces.easy_lower), "5:07");
    assert_eq!(format_pace_rounded(paces.easy_upper), "5:38");
    assert_eq!(format_pace_rounded(paces.marathon), "4:31");
    assert_eq!(format_pace_rounded(paces.threshold), "4:15");
    assert_eq!(format_pace_rounded(paces.interval), "3:55");
    assert_eq!(format_pace_rounded(paces.repetition), "3:40");
}

#[test]
fn test_training_paces_slow_runner_adjustment() {
    assert!(DanielsModel::is_slow_runner(30.0));
    assert!(!DanielsModel::is_slow_runner(39.0));

    let paces = DanielsModel::training_paces(30.0);
    assert_eq!(format_pace_rounded(paces.easy_lower), "7:05");
    assert_eq!(format_pace_rounded(paces.easy_upper), "7:46");
    assert_eq!(format_pace_rounded(paces.threshold), "6:10");
    assert_eq!(format_pace_rounded(paces.interval), "5:29");
    assert_eq!(format_pace_rounded(paces.repetition), "5:14");
}

#[test]
fn test_training_paces_are_ordered_by_intensity() {
    for vdot in [32.0, 45.0, 60.0, 75.0] {
        let paces = DanielsModel::training_paces(vdot);
        assert!(paces.repetition < paces.interval, "vdot {vdot}");
        assert!(paces.interval < paces.threshold, "vdot {vdot}");
        assert!(paces.threshold < paces.marathon, "vdot {vdot}");
        assert!(paces.marathon < paces.easy_lower, "vdot {vdot}");
        assert!(paces.easy_lower < paces.easy_upper, "vdot {vdot}");
    }
}

#[test]
fn test_repetition_is_six_seconds_per_400m_faster() {
    let interval = DanielsModel::interval_pace(50.0, 400.0);
    let repetition = DanielsModel::repetition_pace(50.0, 400.0);
    assert_close((interval - repetition) * 60.0, 6.0, 1e-9);
}
