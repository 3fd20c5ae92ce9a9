// ABOUTME: Training pace zones from fitted models with linear interpolation between reference distances
// ABOUTME: Classifies each zone as a flat pace range or a per-distance split ladder and assembles the tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Training pace zones
//!
//! Each zone has fast/slow pace models at several reference distances. For a
//! raced distance between two references the paces are interpolated linearly;
//! outside the modeled range the nearest reference is used. Paces are seconds
//! per kilometer throughout.

use std::collections::BTreeMap;

use runcalc_core::constants::units::METERS_PER_KM;
use runcalc_core::errors::AppResult;
use runcalc_core::formatters::format_pace_ms;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::fitted::{evaluate_model, nearest_reference_distance, validate_performance, FittedModelEngine};
use crate::models::{FastSlowModels, ZoneGroup, ZoneKey, ZoneModels};
use crate::ordered::OrderedEntries;

const CRUISE_ZONE_TYPE: &str = "cruise";
const CRUISE_INTERVALS: &str = "cruise_intervals";
const CRUISE_DESCRIPTION: &str = "Moderate pace repetitions with very short recovery jogs";
const PACE_FORMAT: &str = "MM:SS/km";

/// Display names for model zone types
const ZONE_NAME_MAPPINGS: &[(ZoneGroup, &str, &str)] = &[
    (ZoneGroup::Endurance, "recovery", "recovery_jogs"),
    (ZoneGroup::Endurance, "easy", "easy_runs"),
    (ZoneGroup::Endurance, "long", "long_runs"),
    (ZoneGroup::Stamina, "steady-state_runs", "steady_state_runs"),
    (ZoneGroup::Stamina, "tempo", "tempo_runs"),
    (ZoneGroup::Stamina, "tempo_interval", "tempo_intervals"),
];

const ZONE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("recovery_jogs", "Very easy recovery runs"),
    ("easy_runs", "Comfortable aerobic base runs"),
    ("long_runs", "Long aerobic runs to build endurance"),
    ("steady_state_runs", "Easy-Moderate continuous runs"),
    ("tempo_runs", "Moderate pace continuous runs"),
    ("tempo_intervals", "Moderate pace repetitions with short recovery jogs"),
];

/// How a zone is rendered in the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneOutput {
    /// A single fast/slow pace pair under `name`
    PaceRange {
        /// Output type name, e.g. `easy_runs`
        name: String,
        /// Human description
        description: String,
    },
    /// One split/pace entry per repetition distance under `name`
    DistanceLadder {
        /// Output type name, e.g. `cruise_intervals` or `speedster`
        name: String,
        /// Description used when the type is first created
        description: String,
        /// Repetition distance in meters
        distance: u32,
    },
}

/// Decide how a zone is rendered; `None` for a ladder zone without a distance
#[must_use]
pub fn classify(key: &ZoneKey) -> Option<ZoneOutput> {
    match key.zone_group {
        ZoneGroup::Stamina if key.zone_type == CRUISE_ZONE_TYPE => {
            key.zone_distance.map(|distance| ZoneOutput::DistanceLadder {
                name: CRUISE_INTERVALS.to_owned(),
                description: CRUISE_DESCRIPTION.to_owned(),
                distance,
            })
        }
        ZoneGroup::Endurance | ZoneGroup::Stamina => {
            let name = display_name(key.zone_group, &key.zone_type);
            let description = zone_description(&name);
            Some(ZoneOutput::PaceRange { name, description })
        }
        ZoneGroup::Speed | ZoneGroup::Sprint => {
            key.zone_distance.map(|distance| ZoneOutput::DistanceLadder {
                name: key.zone_type.clone(),
                description: format!(
                    "{} training for {} athletes",
                    key.zone_group.title(),
                    key.zone_type.replace('_', " ")
                ),
                distance,
            })
        }
    }
}

fn display_name(group: ZoneGroup, zone_type: &str) -> String {
    ZONE_NAME_MAPPINGS
        .iter()
        .find(|(g, from, _)| *g == group && *from == zone_type)
        .map_or_else(|| zone_type.to_owned(), |(_, _, to)| (*to).to_owned())
}

fn zone_description(name: &str) -> String {
    ZONE_DESCRIPTIONS
        .iter()
        .find(|(zone, _)| *zone == name)
        .map_or_else(
            || format!("{} pace", title_case(&name.replace('_', " "))),
            |(_, description)| (*description).to_owned(),
        )
}

/// Capitalize the first letter of every alphabetic run
fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;
    text.chars()
        .map(|c| {
            let mapped = if previous_is_letter {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            };
            previous_is_letter = c.is_alphabetic();
            mapped
        })
        .collect()
}

/// Fast and slow ends of a range, formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRange {
    /// Faster end
    pub fast: String,
    /// Slower end
    pub slow: String,
    /// Display format of the two values
    pub format: String,
}

/// Split over a repetition distance plus the equivalent per-km pace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitAndPace {
    /// Time over the repetition distance
    pub split: FormattedRange,
    /// Pace per kilometer
    pub pace: FormattedRange,
}

/// Output node for one zone type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ZoneTypeOutput {
    /// Flat pace range
    PaceRange {
        /// Pace range per kilometer
        pace: FormattedRange,
        /// Human description
        description: String,
    },
    /// Per-distance splits
    DistanceLadder {
        /// Human description
        description: String,
        /// Repetition meters → split and pace, serialized as `"<meters>m"` keys
        #[serde(serialize_with = "serialize_ladder")]
        distances: BTreeMap<u32, SplitAndPace>,
    },
}

/// Ladder keys become `"400m"`, `"1200m"`, ... in ascending distance order
fn serialize_ladder<S: Serializer>(
    distances: &BTreeMap<u32, SplitAndPace>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(distances.len()))?;
    for (meters, split) in distances {
        map.serialize_entry(&format!("{meters}m"), split)?;
    }
    map.end()
}

impl ZoneTypeOutput {
    fn ladder(description: &str) -> Self {
        Self::DistanceLadder {
            description: description.to_owned(),
            distances: BTreeMap::new(),
        }
    }
}

/// Output node for one zone group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneGroupOutput {
    /// Human description of the group
    pub description: String,
    /// Zone types in this group, in the order they were added
    pub types: OrderedEntries<ZoneTypeOutput>,
}

impl ZoneGroupOutput {
    fn new(description: &str, types: &[(&str, &str)]) -> Self {
        Self {
            description: description.to_owned(),
            types: types
                .iter()
                .map(|(name, description)| ((*name).to_owned(), ZoneTypeOutput::ladder(description)))
                .collect(),
        }
    }
}

/// Full training pace tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingZoneTree {
    /// Easy, long and recovery running
    pub endurance: ZoneGroupOutput,
    /// Steady state, tempo and cruise work
    pub stamina: ZoneGroupOutput,
    /// Short, high-effort repetitions
    pub speed: ZoneGroupOutput,
    /// Very short, very fast repetitions
    pub sprint: ZoneGroupOutput,
}

impl TrainingZoneTree {
    /// Tree with every group described and the speed/sprint athlete types present
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            endurance: ZoneGroupOutput::new(
                "Endurance Zone: Running at an easy effort for extended periods of time",
                &[],
            ),
            stamina: ZoneGroupOutput::new("Stamina Zone: Medium-effort, medium duration running", &[]),
            speed: ZoneGroupOutput::new(
                "Speed Zone: Running at a high effort for a short duration",
                &[
                    ("endurance_monster", "Speed training for endurance-focused athletes"),
                    ("speedster", "Speed training for speed-focused athletes"),
                ],
            ),
            sprint: ZoneGroupOutput::new(
                "Sprint Zone: Running at a very high speed for a very short distance",
                &[
                    ("endurance_monster", "Sprint training for endurance-focused athletes"),
                    ("speedster", "Sprint training for speed-focused athletes"),
                ],
            ),
        }
    }

    /// Mutable access to one group
    pub fn group_mut(&mut self, group: ZoneGroup) -> &mut ZoneGroupOutput {
        match group {
            ZoneGroup::Endurance => &mut self.endurance,
            ZoneGroup::Stamina => &mut self.stamina,
            ZoneGroup::Speed => &mut self.speed,
            ZoneGroup::Sprint => &mut self.sprint,
        }
    }

    /// Place an interpolated pace pair according to its classification
    pub fn insert(&mut self, group: ZoneGroup, output: ZoneOutput, fast_pace: f64, slow_pace: f64) {
        let types = &mut self.group_mut(group).types;
        match output {
            ZoneOutput::PaceRange { name, description } => {
                types.insert(
                    name,
                    ZoneTypeOutput::PaceRange {
                        pace: format_pace_range(fast_pace, slow_pace),
                        description,
                    },
                );
            }
            ZoneOutput::DistanceLadder {
                name,
                description,
                distance,
            } => {
                let entry = types.get_or_insert_with(name, || ZoneTypeOutput::ladder(&description));
                if !matches!(entry, ZoneTypeOutput::DistanceLadder { .. }) {
                    *entry = ZoneTypeOutput::ladder(&description);
                }
                if let ZoneTypeOutput::DistanceLadder { distances, .. } = entry {
                    let fast_velocity = METERS_PER_KM / fast_pace;
                    let slow_velocity = METERS_PER_KM / slow_pace;
                    distances.insert(distance, format_pace_and_time(fast_velocity, slow_velocity, distance));
                }
            }
        }
    }
}

/// Format a fast/slow pace pair (seconds per km)
#[must_use]
pub fn format_pace_range(fast_pace: f64, slow_pace: f64) -> FormattedRange {
    FormattedRange {
        fast: format_pace_ms(fast_pace),
        slow: format_pace_ms(slow_pace),
        format: PACE_FORMAT.to_owned(),
    }
}

/// Split times over `distance` and per-km paces from velocities in m/s
#[must_use]
pub fn format_pace_and_time(fast_velocity: f64, slow_velocity: f64, distance: u32) -> SplitAndPace {
    let meters = f64::from(distance);
    SplitAndPace {
        split: FormattedRange {
            fast: format_pace_ms(meters / fast_velocity),
            slow: format_pace_ms(meters / slow_velocity),
            format: format!("MM:SS/{distance}m"),
        },
        pace: format_pace_range(METERS_PER_KM / fast_velocity, METERS_PER_KM / slow_velocity),
    }
}

fn predict_pair(time_seconds: f64, models: &FastSlowModels) -> AppResult<(f64, f64)> {
    Ok((
        evaluate_model(time_seconds, &models.fast)?,
        evaluate_model(time_seconds, &models.slow)?,
    ))
}

/// Modeled distance equal to `distance_meters`, if any
fn exact_reference(models: &ZoneModels, distance_meters: f64) -> Option<u32> {
    let meters = distance_meters as u32;
    let whole = (f64::from(meters) - distance_meters).abs() < f64::EPSILON;
    (whole && models.contains_key(&meters)).then_some(meters)
}

/// Tightest modeled pair with `lower < distance < upper`
fn interpolation_bounds(distances: &[u32], distance_meters: f64) -> (Option<u32>, Option<u32>) {
    let lower = distances
        .iter()
        .rev()
        .copied()
        .find(|d| f64::from(*d) < distance_meters);
    let upper = distances
        .iter()
        .copied()
        .find(|d| f64::from(*d) > distance_meters);
    (lower, upper)
}

/// Interpolate a zone's fast/slow paces from already-fetched models
///
/// Returns `Ok(None)` when `models` is empty.
///
/// # Errors
///
/// Returns `PredictionFailed` if any model needed for the result fails
pub fn interpolate_models(
    models: &ZoneModels,
    distance_meters: f64,
    time_seconds: f64,
) -> AppResult<Option<(f64, f64)>> {
    let distances: Vec<u32> = models.keys().copied().collect();
    let (Some(&first), Some(&last)) = (distances.first(), distances.last()) else {
        return Ok(None);
    };

    let at = |meters: u32| -> AppResult<Option<(f64, f64)>> {
        models
            .get(&meters)
            .map(|pair| predict_pair(time_seconds, pair))
            .transpose()
    };
    let nearest = || nearest_reference_distance(&distances, distance_meters).map_or(Ok(None), at);

    if let Some(meters) = exact_reference(models, distance_meters) {
        return at(meters);
    }

    if distance_meters < f64::from(first) || distance_meters > f64::from(last) {
        return nearest();
    }

    let (Some(lower), Some(upper)) = interpolation_bounds(&distances, distance_meters) else {
        return nearest();
    };
    let (Some(lower_models), Some(upper_models)) = (models.get(&lower), models.get(&upper)) else {
        return nearest();
    };

    let (fast_lower, slow_lower) = predict_pair(time_seconds, lower_models)?;
    let (fast_upper, slow_upper) = predict_pair(time_seconds, upper_models)?;

    let weight = (distance_meters - f64::from(lower)) / f64::from(upper - lower);
    let fast = weight.mul_add(fast_upper - fast_lower, fast_lower);
    let slow = weight.mul_add(slow_upper - slow_lower, slow_lower);
    Ok(Some((fast, slow)))
}

impl FittedModelEngine<'_> {
    /// Fast and slow paces for one zone at the raced distance
    ///
    /// Uses the raw performance, not a normalized one: exact reference
    /// distances evaluate directly, distances outside the modeled range use
    /// the nearest reference, and anything between two references is
    /// interpolated linearly. Returns `Ok(None)` for an unknown zone.
    ///
    /// # Errors
    ///
    /// Returns `PredictionFailed` if a needed model fails, or
    /// `ModelLoadingFailed` if the table cannot be loaded
    pub fn interpolate_zone(
        &self,
        zone: &ZoneKey,
        distance_meters: f64,
        time_seconds: f64,
    ) -> AppResult<Option<(f64, f64)>> {
        self.models
            .training_pace_models(zone)?
            .map_or(Ok(None), |models| {
                interpolate_models(&models, distance_meters, time_seconds)
            })
    }

    /// Compute every training pace zone for a performance
    ///
    /// Zones that cannot be evaluated are left out of the tree.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for implausible performances or
    /// `ModelLoadingFailed` if the table cannot be loaded
    pub fn compute_training_paces(
        &self,
        distance_meters: f64,
        time_seconds: f64,
    ) -> AppResult<TrainingZoneTree> {
        validate_performance(distance_meters, time_seconds, &self.limits)?;

        let table = self.models.table()?;
        let mut tree = TrainingZoneTree::seeded();

        for zone in table.zone_keys() {
            let Some(output) = classify(zone) else {
                debug!(zone = %zone, "Skipping distance zone without a repetition distance");
                continue;
            };
            let Some(models) = table.zone_models(zone) else {
                continue;
            };
            match interpolate_models(models, distance_meters, time_seconds) {
                Ok(Some((fast, slow))) => tree.insert(zone.zone_group, output, fast, slow),
                Ok(None) => {}
                Err(error) => debug!(zone = %zone, error = %error, "Skipping zone without usable model"),
            }
        }

        Ok(tree)
    }
}
