// ABOUTME: Unit tests for heart-rate zone calculation by %HRmax and %HR reserve
// ABOUTME: Covers max HR estimation, explicit max HR override, rounding and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use runcalc_core::errors::ErrorCode;
use runcalc_intelligence::heart_rate::{
    estimate_max_heart_rate, heart_rate_zones, MaxHrFormula, HR_ZONE_DEFINITIONS,
};

#[test]
fn test_estimate_is_mean_of_formulas() {
    let age = 45.0;
    let mean: f64 = MaxHrFormula::ALL
        .iter()
        .map(|formula| formula.estimate(age))
        .sum::<f64>()
        / MaxHrFormula::ALL.len() as f64;
    assert_eq!(estimate_max_heart_rate(age), mean.round_ties_even() as i64);
    assert!(MaxHrFormula::ALL.len() >= 6);
}

#[test]
fn test_effective_max_defaults_to_estimate() {
    let zones = heart_rate_zones(30.0, 60.0, None).unwrap();
    assert_eq!(zones.estimated_max_heart_rate, 187);
    assert!((zones.effective_max_heart_rate - 187.0).abs() < f64::EPSILON);
}

#[test]
fn test_zone_bounds_by_max_and_reserve() {
    let zones = heart_rate_zones(30.0, 60.0, None).unwrap();
    let easy = zones.zones.get("endurance").unwrap().types.get("easy_runs").unwrap();

    assert_eq!(easy.hrmax.min, 112);
    assert_eq!(easy.hrmax.max, 159);
    assert_eq!(easy.hrmax.range, "112-159 BPM");
    assert_eq!(easy.hrreserve.min, 130);
    assert_eq!(easy.hrreserve.max, 159);
    assert_eq!(easy.description, "Comfortable aerobic base runs");
}

#[test]
fn test_explicit_max_overrides_estimate() {
    let zones = heart_rate_zones(30.0, 50.0, Some(200.0)).unwrap();
    assert_eq!(zones.estimated_max_heart_rate, 187);

    let tempo = zones.zones.get("stamina").unwrap().types.get("tempo_runs").unwrap();
    // 85-90% of 200
    assert_eq!(tempo.hrmax.min, 170);
    assert_eq!(tempo.hrmax.max, 180);
    // 80-85% of 150 reserve above 50
    assert_eq!(tempo.hrreserve.min, 170);
    assert_eq!(tempo.hrreserve.max, 178);
}

#[test]
fn test_every_definition_is_reported() {
    let zones = heart_rate_zones(40.0, 55.0, None).unwrap();
    let reported: usize = zones.zones.entries().map(|(_, group)| group.types.len()).sum();
    assert_eq!(reported, HR_ZONE_DEFINITIONS.len());
    assert_eq!(zones.zones.get("speed").unwrap().description, "Speed Zone training");
}

#[test]
fn test_zones_follow_definition_order() {
    let zones = heart_rate_zones(35.0, 58.0, None).unwrap();

    assert_eq!(
        zones.zones.keys().collect::<Vec<_>>(),
        ["endurance", "stamina", "speed", "sprint"]
    );
    for (group_name, group) in zones.zones.entries() {
        let defined: Vec<&str> = HR_ZONE_DEFINITIONS
            .iter()
            .filter(|definition| definition.group.as_str() == group_name)
            .map(|definition| definition.name)
            .collect();
        assert_eq!(group.types.keys().collect::<Vec<_>>(), defined, "{group_name}");
    }

    // recovery_jogs is defined before easy_runs, alphabetical order would flip them
    let text = serde_json::to_string(&zones).unwrap();
    let recovery = text.find("\"recovery_jogs\"").unwrap();
    let long = text.find("\"long_runs\"").unwrap();
    let easy = text.find("\"easy_runs\"").unwrap();
    assert!(recovery < long && long < easy);
}

#[test]
fn test_whole_bpm_values_serialize_as_integers() {
    let zones = heart_rate_zones(30.0, 60.0, Some(190.0)).unwrap();
    let json = serde_json::to_value(&zones).unwrap();
    assert_eq!(json["effective_max_heart_rate"], serde_json::json!(190));
    assert_eq!(json["resting_heart_rate"], serde_json::json!(60));

    let zones = heart_rate_zones(30.0, 60.5, None).unwrap();
    let json = serde_json::to_value(&zones).unwrap();
    assert_eq!(json["resting_heart_rate"], serde_json::json!(60.5));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    for (age, resting, max) in [(0.0, 60.0, None), (30.0, -1.0, None), (30.0, 60.0, Some(0.0))] {
        let err = heart_rate_zones(age, resting, max).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
