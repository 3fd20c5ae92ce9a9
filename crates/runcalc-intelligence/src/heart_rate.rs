// ABOUTME: Heart-rate zones from age, resting HR and optional max HR, by %HRmax and %HR reserve
// ABOUTME: Max HR estimated as the mean of eight published age-regression formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Heart-rate zones
//!
//! Zone bounds are computed two ways for every zone:
//!
//! - HRmax: `pct × max_hr`
//! - HR reserve (Karvonen): `pct × (max_hr − resting_hr) + resting_hr`
//!
//! Every bound is rounded half-to-even to a whole BPM.
//!
//! # Scientific References
//!
//! - Londeree, B.R. & Moeschberger, M.L. (1982). Effect of age and other factors on maximal heart rate.
//! - Tanaka, H. et al. (2001). "Age-predicted maximal heart rate revisited." *J Am Coll Cardiol*, 37(1), 153-156.
//! - Robergs, R.A. & Landwehr, R. (2002). The surprising history of the "HRmax = 220 − age" equation.
//! - Karvonen, M.J. et al. (1957). The effects of training on heart rate.

use runcalc_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::ZoneGroup;
use crate::ordered::OrderedEntries;

/// Age-predicted maximum heart rate regressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxHrFormula {
    /// 206.3 − 0.711 × age
    Londeree,
    /// 217 − 0.85 × age
    Miller,
    /// 206.9 − 0.67 × age
    Jackson,
    /// 202 − 0.55 × age
    Whyte,
    /// 191.5 − 0.007 × age²
    Oakland,
    /// 208 − 0.7 × age
    Tanaka,
    /// 211 − 0.64 × age
    Wisloff,
    /// 205.8 − 0.685 × age
    Robergs,
}

impl MaxHrFormula {
    /// Every formula contributing to the estimate
    pub const ALL: [Self; 8] = [
        Self::Londeree,
        Self::Miller,
        Self::Jackson,
        Self::Whyte,
        Self::Oakland,
        Self::Tanaka,
        Self::Wisloff,
        Self::Robergs,
    ];

    /// Formula name for logging and debugging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Londeree => "londeree",
            Self::Miller => "miller",
            Self::Jackson => "jackson",
            Self::Whyte => "whyte",
            Self::Oakland => "oakland",
            Self::Tanaka => "tanaka",
            Self::Wisloff => "wisloff",
            Self::Robergs => "robergs",
        }
    }

    /// The regression as a string
    #[must_use]
    pub const fn formula(self) -> &'static str {
        match self {
            Self::Londeree => "206.3 - 0.711 x age",
            Self::Miller => "217 - 0.85 x age",
            Self::Jackson => "206.9 - 0.67 x age",
            Self::Whyte => "202 - 0.55 x age",
            Self::Oakland => "191.5 - 0.007 x age^2",
            Self::Tanaka => "208 - 0.7 x age",
            Self::Wisloff => "211 - 0.64 x age",
            Self::Robergs => "205.8 - 0.685 x age",
        }
    }

    /// Predicted max heart rate in BPM for `age` years
    #[must_use]
    pub fn estimate(self, age: f64) -> f64 {
        match self {
            Self::Londeree => 0.711f64.mul_add(-age, 206.3),
            Self::Miller => 0.85f64.mul_add(-age, 217.0),
            Self::Jackson => 0.67f64.mul_add(-age, 206.9),
            Self::Whyte => 0.55f64.mul_add(-age, 202.0),
            Self::Oakland => (0.007 * age).mul_add(-age, 191.5),
            Self::Tanaka => 0.7f64.mul_add(-age, 208.0),
            Self::Wisloff => 0.64f64.mul_add(-age, 211.0),
            Self::Robergs => 0.685f64.mul_add(-age, 205.8),
        }
    }
}

/// Mean of every formula, rounded half-to-even
///
/// ```
/// use runcalc_intelligence::heart_rate::estimate_max_heart_rate;
/// assert_eq!(estimate_max_heart_rate(30.0), 187);
/// ```
#[must_use]
pub fn estimate_max_heart_rate(age: f64) -> i64 {
    let total: f64 = MaxHrFormula::ALL.iter().map(|formula| formula.estimate(age)).sum();
    (total / MaxHrFormula::ALL.len() as f64).round_ties_even() as i64
}

/// Static definition of one heart-rate zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HrZoneDefinition {
    /// Group the zone belongs to
    pub group: ZoneGroup,
    /// Zone name
    pub name: &'static str,
    /// Percent of max heart rate (low, high)
    pub hrmax_percent: (u8, u8),
    /// Percent of heart-rate reserve (low, high)
    pub hrreserve_percent: (u8, u8),
    /// Human description
    pub description: &'static str,
}

const fn zone(
    group: ZoneGroup,
    name: &'static str,
    hrmax_percent: (u8, u8),
    hrreserve_percent: (u8, u8),
    description: &'static str,
) -> HrZoneDefinition {
    HrZoneDefinition {
        group,
        name,
        hrmax_percent,
        hrreserve_percent,
        description,
    }
}

/// Zone definitions by group
pub const HR_ZONE_DEFINITIONS: &[HrZoneDefinition] = &[
    zone(ZoneGroup::Endurance, "recovery_jogs", (60, 70), (55, 65), ""),
    zone(ZoneGroup::Endurance, "long_runs", (60, 85), (55, 78), "Long aerobic runs to build endurance"),
    zone(ZoneGroup::Endurance, "easy_runs", (60, 85), (55, 78), "Comfortable aerobic base runs"),
    zone(ZoneGroup::Stamina, "steady_state_runs", (83, 87), (75, 80), "Easy-Moderate continuous runs"),
    zone(ZoneGroup::Stamina, "tempo_runs", (85, 90), (80, 85), "Moderate pace continuous runs"),
    zone(
        ZoneGroup::Stamina,
        "tempo_intervals",
        (87, 92),
        (82, 87),
        "Moderate pace repetitions with short recovery jogs",
    ),
    zone(
        ZoneGroup::Stamina,
        "cruise_intervals",
        (87, 92),
        (85, 90),
        "Moderate pace repetitions with very short recovery jogs",
    ),
    zone(
        ZoneGroup::Speed,
        "endurance_monster",
        (90, 100),
        (90, 100),
        "Speed training for endurance-focused athletes",
    ),
    zone(ZoneGroup::Speed, "speedster", (90, 100), (90, 100), "Speed training for speed-focused athletes"),
    zone(
        ZoneGroup::Sprint,
        "endurance_monster",
        (90, 100),
        (90, 100),
        "Sprint training for endurance-focused athletes",
    ),
    zone(ZoneGroup::Sprint, "speedster", (90, 100), (90, 100), "Sprint training for speed-focused athletes"),
];

/// Whole-number BPM values serialize as integers
fn serialize_bpm<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Lower and upper bound of a zone in BPM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BpmRange {
    /// Lower bound
    pub min: i64,
    /// Upper bound
    pub max: i64,
    /// `"min-max BPM"`
    pub range: String,
}

impl BpmRange {
    fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            range: format!("{min}-{max} BPM"),
        }
    }
}

/// Computed bounds for one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrZone {
    /// Human description
    pub description: String,
    /// Bounds by percent of max heart rate
    pub hrmax: BpmRange,
    /// Bounds by percent of heart-rate reserve
    pub hrreserve: BpmRange,
}

/// Zones of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrZoneGroup {
    /// `"<Group> Zone training"`
    pub description: String,
    /// Zone name → bounds, in definition order
    pub types: OrderedEntries<HrZone>,
}

/// Heart-rate zone report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateZones {
    /// Mean of the age-predicted formulas
    pub estimated_max_heart_rate: i64,
    /// Max heart rate used for the zones
    #[serde(serialize_with = "serialize_bpm")]
    pub effective_max_heart_rate: f64,
    /// Resting heart rate as supplied
    #[serde(serialize_with = "serialize_bpm")]
    pub resting_heart_rate: f64,
    /// Group name → zones, in definition order
    pub zones: OrderedEntries<HrZoneGroup>,
}

/// `pct` of `base`, rounded half-to-even
fn percent_of(pct: u8, base: f64) -> i64 {
    (f64::from(pct) / 100.0 * base).round_ties_even() as i64
}

/// `pct` of the reserve above `resting`, rounded half-to-even
fn percent_of_reserve(pct: u8, max_hr: f64, resting_hr: f64) -> i64 {
    let above_resting = f64::from(pct) / 100.0 * (max_hr - resting_hr);
    (above_resting + resting_hr).round_ties_even() as i64
}

/// Compute heart-rate zones
///
/// Uses `max_heart_rate` when supplied, otherwise the formula estimate.
///
/// # Errors
///
/// Returns `InvalidInput` if age, resting heart rate, or a supplied max heart
/// rate is not positive
pub fn heart_rate_zones(
    age: f64,
    resting_heart_rate: f64,
    max_heart_rate: Option<f64>,
) -> AppResult<HeartRateZones> {
    if age <= 0.0 {
        return Err(AppError::invalid_input("Age must be positive"));
    }
    if resting_heart_rate <= 0.0 {
        return Err(AppError::invalid_input("Resting heart rate must be positive"));
    }
    if max_heart_rate.is_some_and(|max| max <= 0.0) {
        return Err(AppError::invalid_input("Max heart rate must be positive"));
    }

    let estimated = estimate_max_heart_rate(age);
    let effective = max_heart_rate.unwrap_or(estimated as f64);

    let mut zones: OrderedEntries<HrZoneGroup> = OrderedEntries::new();
    for definition in HR_ZONE_DEFINITIONS {
        let group = zones.get_or_insert_with(definition.group.as_str().to_owned(), || HrZoneGroup {
            description: format!("{} Zone training", definition.group.title()),
            types: OrderedEntries::new(),
        });

        let (hrmax_low, hrmax_high) = definition.hrmax_percent;
        let (reserve_low, reserve_high) = definition.hrreserve_percent;
        group.types.insert(
            definition.name.to_owned(),
            HrZone {
                description: definition.description.to_owned(),
                hrmax: BpmRange::new(percent_of(hrmax_low, effective), percent_of(hrmax_high, effective)),
                hrreserve: BpmRange::new(
                    percent_of_reserve(reserve_low, effective, resting_heart_rate),
                    percent_of_reserve(reserve_high, effective, resting_heart_rate),
                ),
            },
        );
    }

    Ok(HeartRateZones {
        estimated_max_heart_rate: estimated,
        effective_max_heart_rate: effective,
        resting_heart_rate,
        zones,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_group_has_zones() {
        for group in ZoneGroup::ALL {
            assert!(HR_ZONE_DEFINITIONS.iter().any(|zone| zone.group == group));
        }
    }

    #[test]
    fn test_oakland_is_quadratic() {
        let at_40 = MaxHrFormula::Oakland.estimate(40.0);
        assert!((at_40 - 180.3).abs() < 1e-9);
    }
}
