// ABOUTME: Unit tests for pace and speed conversions and pace string parsing
// ABOUTME: Covers reciprocal failures, two-step chains and M:SS parsing edge cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use runcalc_core::errors::ErrorCode;
use runcalc_core::formatters::format_pace_truncated;
use runcalc_intelligence::conversions::conversion_chain;
use runcalc_intelligence::{convert, parse_pace_string, PaceUnit};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_min_km_to_min_mile() {
    let minutes = convert(5.0, PaceUnit::MinPerKm, PaceUnit::MinPerMile).unwrap();
    assert_close(minutes, 8.046_72);
    assert_eq!(format_pace_truncated(minutes), "8:02");
}

#[test]
fn test_pace_to_speed_is_reciprocal() {
    assert_close(convert(5.0, PaceUnit::MinPerKm, PaceUnit::Kmh).unwrap(), 12.0);
    assert_close(convert(12.0, PaceUnit::Kmh, PaceUnit::MinPerKm).unwrap(), 5.0);
}

#[test]
fn test_cross_unit_chain_uses_two_steps() {
    assert_eq!(conversion_chain(PaceUnit::MinPerKm, PaceUnit::Mph).len(), 2);
    let mph = convert(5.0, PaceUnit::MinPerKm, PaceUnit::Mph).unwrap();
    assert_close(mph, 12.0 / 1.609_344);
}

#[test]
fn test_same_unit_is_identity() {
    for unit in PaceUnit::ALL {
        assert_close(convert(7.25, unit, unit).unwrap(), 7.25);
    }
}

#[test]
fn test_every_unit_pair_round_trips() {
    for from in PaceUnit::ALL {
        for to in PaceUnit::ALL {
            for value in [0.8, 4.5, 7.25, 18.0] {
                let there = convert(value, from, to).unwrap();
                let back = convert(there, to, from).unwrap();
                assert!(
                    (back - value).abs() <= value * 1e-12,
                    "{from:?} -> {to:?} -> {from:?}: {value} came back as {back}"
                );
            }
        }
    }
}

#[test]
fn test_non_positive_reciprocal_fails() {
    let err = convert(0.0, PaceUnit::Kmh, PaceUnit::MinPerKm).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("Speed must be a positive value"));

    let err = convert(-1.0, PaceUnit::MinPerMile, PaceUnit::Mph).unwrap_err();
    assert!(err.message.contains("Pace must be a positive value"));
}

#[test]
fn test_pace_to_pace_never_fails_for_positive_input() {
    assert!(convert(0.5, PaceUnit::MinPerMile, PaceUnit::MinPerKm).is_ok());
    assert!(convert(30.0, PaceUnit::Kmh, PaceUnit::Mph).is_ok());
}

#[test]
fn test_unit_parsing() {
    assert_eq!("min_mile".parse::<PaceUnit>().unwrap(), PaceUnit::MinPerMile);
    assert_eq!("kmh".parse::<PaceUnit>().unwrap(), PaceUnit::Kmh);
    let err = "knots".parse::<PaceUnit>().unwrap_err();
    assert!(err.message.contains("Must be one of"));
}

#[test]
fn test_parse_pace_string() {
    assert_close(parse_pace_string("4:30").unwrap(), 4.5);
    assert_close(parse_pace_string("12:06").unwrap(), 12.1);
}

#[test]
fn test_parse_pace_string_rejects_malformed_input() {
    for input in ["430", "1:02:03", "4:60", "a:30", "4:3x", "-4:30", ""] {
        let err = parse_pace_string(input).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat, "input {input:?}");
    }
}
