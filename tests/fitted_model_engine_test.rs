// ABOUTME: Integration tests for fitted-model predictions against a hand-built model table
// ABOUTME: Covers validation, Riegel normalization, velocity markers, race times and zone interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use runcalc_core::errors::ErrorCode;
use runcalc_intelligence::fitted::{FittedModelEngine, VelocityMarker};
use runcalc_intelligence::models::{ModelManager, ZoneGroup, ZoneKey};
use runcalc_intelligence::zones::{classify, ZoneOutput, ZoneTypeOutput};
use runcalc_intelligence::{riegel, ValidationLimits};

fn engine(manager: &ModelManager) -> FittedModelEngine<'_> {
    FittedModelEngine::new(manager, ValidationLimits::default())
}

fn assert_pair(actual: Option<(f64, f64)>, fast: f64, slow: f64) {
    let (actual_fast, actual_slow) = actual.expect("zone interpolates");
    assert!((actual_fast - fast).abs() < 1e-9, "fast {actual_fast} != {fast}");
    assert!((actual_slow - slow).abs() < 1e-9, "slow {actual_slow} != {slow}");
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_distance_below_minimum_is_rejected() {
    let manager = common::fixture_manager();
    let err = engine(&manager)
        .predict_velocity_marker(399.0, 120.0, VelocityMarker::Vlt)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("Distance too short"));
}

#[test]
fn test_implausibly_fast_pace_is_rejected() {
    let manager = common::fixture_manager();
    // 59 s/km
    let err = engine(&manager)
        .predict_all_race_times(5000.0, 295.0)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("unrealistically fast"));
}

#[test]
fn test_validation_runs_before_the_table_is_loaded() {
    let manager = ModelManager::new(common::fixture_path().with_file_name("absent.json"));
    let err = engine(&manager)
        .compute_training_paces(5000.0, -1.0)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(!manager.is_loaded());
}

#[test]
fn test_custom_limits_apply() {
    let manager = common::fixture_manager();
    let limits = ValidationLimits {
        min_distance_meters: 1000.0,
        ..ValidationLimits::default()
    };
    let err = FittedModelEngine::new(&manager, limits)
        .velocity_markers(800.0, 150.0)
        .unwrap_err();
    assert!(err.message.contains("at least 1000m"));
}

// ============================================================================
// Velocity markers
// ============================================================================

#[test]
fn test_velocity_markers_at_reference_distance() {
    let manager = common::fixture_manager();
    let markers = engine(&manager).velocity_markers(5000.0, 1500.0).unwrap();

    assert_eq!(
        markers,
        vec![
            (VelocityMarker::Vlt, 320),
            (VelocityMarker::Cv, 285),
            (VelocityMarker::Vvo2, 270),
        ]
    );
}

#[test]
fn test_velocity_marker_normalizes_to_nearest_reference() {
    let manager = common::fixture_manager();
    let vlt = engine(&manager)
        .predict_velocity_marker(6000.0, 1850.0, VelocityMarker::Vlt)
        .unwrap();

    let projected = riegel::normalize_time(6000.0, 1850.0, 5000.0);
    let expected = 0.2_f64.mul_add(projected, 20.0).round_ties_even() as i64;
    assert_eq!(vlt, expected);
}

#[test]
fn test_velocity_marker_rounds_to_whole_seconds() {
    let manager = common::fixture_manager();
    // 0.092 * 3100 = 285.2
    let cv = engine(&manager)
        .predict_velocity_marker(10_000.0, 3100.0, VelocityMarker::Cv)
        .unwrap();
    assert_eq!(cv, 285);
}

#[test]
fn test_malformed_marker_model_fails_prediction() {
    let manager = common::fixture_manager();
    let err = engine(&manager)
        .velocity_markers(10_000.0, 3100.0)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PredictionFailed);
    assert_eq!(err.message, "Failed to predict vVO2 using model.");
}

// ============================================================================
// Race times
// ============================================================================

#[test]
fn test_race_times_in_catalog_order_with_echo_and_skips() {
    let manager = common::fixture_manager();
    let races = engine(&manager).predict_all_race_times(5000.0, 1500.0).unwrap();

    let expected = [
        ("1500m", "00:06:45"),
        ("Mile", "00:07:18"),
        ("3000m", "00:14:15"),
        ("5000m", "00:25:00"),
        ("10km", "00:52:00"),
        ("1/2 Marathon", "01:55:00"),
        ("Marathon", "04:00:00"),
    ];
    let actual: Vec<(&str, &str)> = races
        .iter()
        .map(|(race, time)| (race.as_str(), time.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_race_echo_uses_truncated_distance() {
    let manager = common::fixture_manager();
    let races = engine(&manager)
        .predict_all_race_times(5000.7, 1500.0)
        .unwrap();
    let five_k = races.iter().find(|(race, _)| race == "5000m").unwrap();
    assert_eq!(five_k.1, "00:25:00");
}

#[test]
fn test_race_times_from_other_reference() {
    let manager = common::fixture_manager();
    let races = engine(&manager)
        .predict_all_race_times(10_000.0, 3100.0)
        .unwrap();

    let actual: Vec<(&str, &str)> = races
        .iter()
        .map(|(race, time)| (race.as_str(), time.as_str()))
        .collect();
    assert_eq!(
        actual,
        [
            ("5000m", "00:24:48"),
            ("10km", "00:51:40"),
            ("1/2 Marathon", "01:53:40"),
            ("Marathon", "03:57:40"),
        ]
    );
}

// ============================================================================
// Zone interpolation
// ============================================================================

#[test]
fn test_exact_reference_matches_direct_evaluation() {
    let manager = common::fixture_manager();
    let easy = ZoneKey::new(ZoneGroup::Endurance, "easy", None);
    let pair = engine(&manager).interpolate_zone(&easy, 5000.0, 1500.0).unwrap();
    assert_pair(pair, 360.0, 420.0);
}

#[test]
fn test_interpolates_between_references() {
    let manager = common::fixture_manager();
    let easy = ZoneKey::new(ZoneGroup::Endurance, "easy", None);
    // 5000m: 460/520, 10000m: 250/310, halfway
    let pair = engine(&manager).interpolate_zone(&easy, 7500.0, 2000.0).unwrap();
    assert_pair(pair, 355.0, 415.0);
}

#[test]
fn test_clamps_outside_modeled_range() {
    let manager = common::fixture_manager();
    let easy = ZoneKey::new(ZoneGroup::Endurance, "easy", None);

    let above = engine(&manager)
        .interpolate_zone(&easy, 20_000.0, 4800.0)
        .unwrap();
    assert_pair(above, 530.0, 590.0);

    let below = engine(&manager).interpolate_zone(&easy, 1000.0, 240.0).unwrap();
    assert_pair(below, 300.0, 360.0);
}

#[test]
fn test_unknown_zone_interpolates_to_nothing() {
    let manager = common::fixture_manager();
    let zone = ZoneKey::new(ZoneGroup::Stamina, "fartlek", None);
    assert!(engine(&manager)
        .interpolate_zone(&zone, 5000.0, 1500.0)
        .unwrap()
        .is_none());
}

#[test]
fn test_zone_classification() {
    let cruise = ZoneKey::new(ZoneGroup::Stamina, "cruise", Some(1000));
    assert!(matches!(
        classify(&cruise),
        Some(ZoneOutput::DistanceLadder { ref name, distance: 1000, .. }) if name == "cruise_intervals"
    ));

    let tempo = ZoneKey::new(ZoneGroup::Stamina, "tempo", None);
    assert!(matches!(
        classify(&tempo),
        Some(ZoneOutput::PaceRange { ref name, .. }) if name == "tempo_runs"
    ));

    let no_distance = ZoneKey::new(ZoneGroup::Speed, "speedster", None);
    assert!(classify(&no_distance).is_none());
}

#[test]
fn test_training_pace_tree() {
    let manager = common::fixture_manager();
    let tree = engine(&manager)
        .compute_training_paces(5000.0, 1500.0)
        .unwrap();

    match tree.endurance.types.get("easy_runs").unwrap() {
        ZoneTypeOutput::PaceRange { pace, description } => {
            assert_eq!(pace.fast, "06:00");
            assert_eq!(pace.slow, "07:00");
            assert_eq!(pace.format, "MM:SS/km");
            assert_eq!(description, "Comfortable aerobic base runs");
        }
        other => panic!("easy_runs should be a pace range, got {other:?}"),
    }
    assert!(tree.endurance.types.contains_key("long_runs"));
    assert!(tree.endurance.types.contains_key("recovery_jogs"));

    match tree.stamina.types.get("tempo_runs").unwrap() {
        ZoneTypeOutput::PaceRange { pace, .. } => {
            assert_eq!(pace.fast, "04:50");
            assert_eq!(pace.slow, "05:10");
        }
        other => panic!("tempo_runs should be a pace range, got {other:?}"),
    }
    // Its slow model is malformed
    assert!(!tree.stamina.types.contains_key("steady_state_runs"));

    match tree.stamina.types.get("cruise_intervals").unwrap() {
        ZoneTypeOutput::DistanceLadder { distances, .. } => {
            let split = &distances[&1000];
            assert_eq!(split.split.format, "MM:SS/1000m");
            assert_eq!(split.pace.format, "MM:SS/km");
        }
        other => panic!("cruise_intervals should be a ladder, got {other:?}"),
    }

    match tree.speed.types.get("speedster").unwrap() {
        ZoneTypeOutput::DistanceLadder { distances, .. } => {
            assert_eq!(distances.keys().copied().collect::<Vec<_>>(), [400]);
        }
        other => panic!("speedster should be a ladder, got {other:?}"),
    }
    // Ladder zone without a repetition distance is skipped, the seeded type stays empty
    match tree.speed.types.get("endurance_monster").unwrap() {
        ZoneTypeOutput::DistanceLadder { distances, .. } => assert!(distances.is_empty()),
        other => panic!("endurance_monster should be a ladder, got {other:?}"),
    }
    match tree.sprint.types.get("endurance_monster").unwrap() {
        ZoneTypeOutput::DistanceLadder { distances, .. } => {
            assert!(distances.contains_key(&200));
        }
        other => panic!("sprint endurance_monster should be a ladder, got {other:?}"),
    }
}

#[test]
fn test_training_pace_tree_serializes_group_descriptions() {
    let manager = common::fixture_manager();
    let tree = engine(&manager)
        .compute_training_paces(5000.0, 1500.0)
        .unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    assert!(json["sprint"]["description"]
        .as_str()
        .unwrap()
        .starts_with("Sprint Zone"));
    assert_eq!(json["endurance"]["types"]["easy_runs"]["pace"]["fast"], "06:00");
}

#[test]
fn test_ladder_distances_ascend_numerically() {
    let manager = common::bundled_manager();
    let tree = engine(&manager)
        .compute_training_paces(10_000.0, 2700.0)
        .unwrap();
    let json = serde_json::to_value(&tree).unwrap();

    let ladder: Vec<&str> = json["speed"]["types"]["endurance_monster"]["distances"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(ladder, ["400m", "800m", "1200m"]);

    let text = serde_json::to_string(&tree.stamina).unwrap();
    let first = text.find("\"1000m\"").unwrap();
    let second = text.find("\"1600m\"").unwrap();
    let third = text.find("\"2000m\"").unwrap();
    assert!(first < second && second < third);
}

// ============================================================================
// Bundled model table
// ============================================================================

#[test]
fn test_bundled_table_critical_velocity_for_fast_400m() {
    let manager = common::bundled_manager();
    let cv = engine(&manager)
        .predict_velocity_marker(400.0, 50.0, VelocityMarker::Cv)
        .unwrap();
    assert!((cv - 176).abs() as f64 <= 176.0 * 0.01, "CV(400m, 50s) = {cv}");

    let markers = engine(&manager).velocity_markers(400.0, 50.0).unwrap();
    let paces: Vec<i64> = markers.iter().map(|(_, pace)| *pace).collect();
    // vLT is the slowest marker and vVO2 the fastest
    assert!(paces[0] > paces[1] && paces[1] > paces[2], "{paces:?}");
}

#[test]
fn test_repeated_predictions_are_identical() {
    let manager = common::bundled_manager();
    let engine = engine(&manager);

    for (distance, time) in [(5000.0, 1500.0), (7500.0, 2300.0), (42_195.0, 14_400.0)] {
        let races = engine.predict_all_race_times(distance, time).unwrap();
        assert_eq!(engine.predict_all_race_times(distance, time).unwrap(), races);

        let tree = engine.compute_training_paces(distance, time).unwrap();
        assert_eq!(engine.compute_training_paces(distance, time).unwrap(), tree);

        let easy = ZoneKey::new(ZoneGroup::Endurance, "easy", None);
        let (fast, slow) = engine.interpolate_zone(&easy, distance, time).unwrap().unwrap();
        let (fast_again, slow_again) = engine.interpolate_zone(&easy, distance, time).unwrap().unwrap();
        assert_eq!(fast.to_bits(), fast_again.to_bits());
        assert_eq!(slow.to_bits(), slow_again.to_bits());
    }
}
