// ABOUTME: Ordered catalog of canonical race events and their distances in meters
// ABOUTME: Used for fitted-model race predictions and for named-distance lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Race distance catalog
//!
//! Distances are whole meters. Imperial events are truncated to the meter
//! (the Mile is 1609, not 1609.344) so that integer comparisons against a
//! truncated input distance identify the event the runner actually raced.

/// Canonical race events in display order
pub const RACE_DISTANCES: &[(&str, u32)] = &[
    ("100m", 100),
    ("200m", 200),
    ("400m", 400),
    ("500m", 500),
    ("600m", 600),
    ("800m", 800),
    ("1000m", 1000),
    ("1500m", 1500),
    ("1600m", 1600),
    ("Mile", 1609),
    ("2000m", 2000),
    ("1.5 Miles", 2414),
    ("3000m", 3000),
    ("3200m", 3200),
    ("2 Miles", 3219),
    ("4000m", 4000),
    ("3 Miles", 4828),
    ("5000m", 5000),
    ("6000m", 6000),
    ("4 Miles", 6437),
    ("8000m", 8000),
    ("5 Miles", 8047),
    ("10km", 10_000),
    ("12km", 12_000),
    ("15km", 15_000),
    ("10 Miles", 16_093),
    ("20km", 20_000),
    ("1/2 Marathon", 21_097),
    ("15 Miles", 24_140),
    ("25km", 25_000),
    ("30km", 30_000),
    ("20 Miles", 32_187),
    ("Marathon", 42_195),
    ("50km", 50_000),
    ("50 Miles", 80_467),
    ("100km", 100_000),
    ("100 Miles", 160_934),
];

/// Distance in meters for a catalog race name
#[must_use]
pub fn race_distance(name: &str) -> Option<u32> {
    RACE_DISTANCES
        .iter()
        .find(|(race, _)| *race == name)
        .map(|(_, meters)| *meters)
}

/// Catalog race names in display order
pub fn race_names() -> impl Iterator<Item = &'static str> {
    RACE_DISTANCES.iter().map(|(name, _)| *name)
}
