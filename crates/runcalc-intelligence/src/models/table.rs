// ABOUTME: Versioned JSON model table: per-distance polynomial models for markers, races, and zones
// ABOUTME: Lenient model records that only fail when evaluated, strict category validation on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Model table artifact
//!
//! The table is a JSON document with three categories:
//!
//! - `velocity_markers`: reference distance → marker key (`vLT`, `CV`, `vVO2`) → model
//! - `race_times`: reference distance → race name → model
//! - `training_paces`: list of zones, each with reference distance → `{fast, slow}` models
//!
//! A model record is `{"type": "polynomial", "coefficients": [...]}` with the
//! highest-degree coefficient first. Records are kept as raw JSON so a single
//! malformed record never prevents the table from loading.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use runcalc_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

/// Failures while reading the model artifact
#[derive(Debug, Error)]
pub enum ModelTableError {
    /// The artifact does not exist
    #[error("Models file not found at {path}")]
    NotFound {
        /// Path that was tried
        path: String,
    },
    /// The artifact exists but could not be read
    #[error("Failed to read models file at {path}: {source}")]
    Io {
        /// Path that was tried
        path: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
    /// The artifact is not a valid model table document
    #[error("Failed to parse models file: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document contains nothing
    #[error("Loaded models table is empty")]
    Empty,
    /// One or more required categories are absent or empty
    #[error("Missing required model categories: {}", .0.join(", "))]
    MissingCategories(Vec<&'static str>),
}

impl From<ModelTableError> for AppError {
    fn from(error: ModelTableError) -> Self {
        Self::model_loading(error.to_string())
    }
}

/// Top-level model categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCategory {
    /// Velocity markers keyed by marker name
    VelocityMarkers,
    /// Race time models keyed by race name
    RaceTimes,
    /// Training pace zone models
    TrainingPaces,
}

impl ModelCategory {
    /// All categories a table must provide
    pub const ALL: [Self; 3] = [Self::VelocityMarkers, Self::RaceTimes, Self::TrainingPaces];

    /// Artifact key for the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VelocityMarkers => "velocity_markers",
            Self::RaceTimes => "race_times",
            Self::TrainingPaces => "training_paces",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training zone groups, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneGroup {
    /// Easy, long and recovery running
    Endurance,
    /// Steady state, tempo and cruise work
    Stamina,
    /// Short, high-effort repetitions
    Speed,
    /// Very short, very fast repetitions
    Sprint,
}

impl ZoneGroup {
    /// All groups in output order
    pub const ALL: [Self; 4] = [Self::Endurance, Self::Stamina, Self::Speed, Self::Sprint];

    /// Wire name of the group
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Endurance => "endurance",
            Self::Stamina => "stamina",
            Self::Speed => "speed",
            Self::Sprint => "sprint",
        }
    }

    /// Capitalized group name used in descriptions
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Endurance => "Endurance",
            Self::Stamina => "Stamina",
            Self::Speed => "Speed",
            Self::Sprint => "Sprint",
        }
    }
}

impl fmt::Display for ZoneGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one training pace zone, e.g. `(sprint, speedster, 400)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneKey {
    /// Zone group
    pub zone_group: ZoneGroup,
    /// Zone type within the group (`easy`, `tempo`, `cruise`, `speedster`, ...)
    pub zone_type: String,
    /// Repetition distance in meters for distance-laddered zones
    pub zone_distance: Option<u32>,
}

impl ZoneKey {
    /// Build a key
    #[must_use]
    pub fn new(zone_group: ZoneGroup, zone_type: impl Into<String>, zone_distance: Option<u32>) -> Self {
        Self {
            zone_group,
            zone_type: zone_type.into(),
            zone_distance,
        }
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone_distance {
            Some(distance) => write!(f, "{}/{}/{distance}m", self.zone_group, self.zone_type),
            None => write!(f, "{}/{}", self.zone_group, self.zone_type),
        }
    }
}

/// A parsed, evaluable model
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    /// Single-variable polynomial, highest-degree coefficient first
    Polynomial {
        /// Coefficients, highest degree first
        coefficients: Vec<f64>,
    },
}

impl FittedModel {
    /// Evaluate the model at `input`
    ///
    /// # Errors
    ///
    /// Returns `PredictionFailed` if the result is NaN or infinite
    pub fn evaluate(&self, input: f64) -> AppResult<f64> {
        let result = match self {
            Self::Polynomial { coefficients } => coefficients
                .iter()
                .fold(0.0_f64, |acc, coefficient| acc.mul_add(input, *coefficient)),
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(AppError::prediction(format!(
                "Model prediction resulted in invalid value: {result}"
            )))
        }
    }
}

/// Raw model record as stored in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSpec(Value);

impl ModelSpec {
    /// Wrap an arbitrary JSON record
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Build a polynomial record
    #[must_use]
    pub fn polynomial(coefficients: &[f64]) -> Self {
        Self(json!({ "type": "polynomial", "coefficients": coefficients }))
    }

    /// Raw JSON record
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Parse the record into an evaluable model
    ///
    /// # Errors
    ///
    /// Returns `PredictionFailed` when the record is not an object, lacks a
    /// `type`, names an unsupported type, or has missing or non-numeric
    /// coefficients
    pub fn parse(&self) -> AppResult<FittedModel> {
        let record = self.0.as_object().ok_or_else(|| {
            AppError::prediction("Model parameters must be an object")
        })?;
        let model_type = record
            .get("type")
            .ok_or_else(|| AppError::prediction("Model parameters missing 'type' field"))?;

        match model_type.as_str() {
            Some("polynomial") => {
                let raw = record.get("coefficients").ok_or_else(|| {
                    AppError::prediction("Polynomial model missing 'coefficients' field")
                })?;
                let coefficients = raw
                    .as_array()
                    .and_then(|values| values.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
                    .filter(|values| !values.is_empty())
                    .ok_or_else(|| {
                        AppError::prediction(
                            "Polynomial model coefficients must be a non-empty list of numbers",
                        )
                    })?;
                Ok(FittedModel::Polynomial { coefficients })
            }
            _ => Err(AppError::prediction(format!(
                "Unsupported model type: {model_type}"
            ))),
        }
    }

    /// Parse and evaluate in one step
    ///
    /// # Errors
    ///
    /// Returns `PredictionFailed` if the record is malformed or the result is
    /// not finite
    pub fn predict(&self, input: f64) -> AppResult<f64> {
        self.parse()?.evaluate(input)
    }
}

/// Fast and slow pace models for one zone at one reference distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastSlowModels {
    /// Model for the fast end of the zone (seconds per km)
    pub fast: ModelSpec,
    /// Model for the slow end of the zone (seconds per km)
    pub slow: ModelSpec,
}

/// Reference distance → key → model
pub type DistanceModels = BTreeMap<u32, BTreeMap<String, ModelSpec>>;

/// Reference distance → fast/slow models
pub type ZoneModels = BTreeMap<u32, FastSlowModels>;

#[derive(Debug, Deserialize)]
struct TrainingPaceEntry {
    zone_group: ZoneGroup,
    zone_type: String,
    #[serde(default)]
    zone_distance: Option<u32>,
    models: ZoneModels,
}

#[derive(Debug, Deserialize)]
struct RawModelTable {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    velocity_markers: Option<DistanceModels>,
    #[serde(default)]
    race_times: Option<DistanceModels>,
    #[serde(default)]
    training_paces: Option<Vec<TrainingPaceEntry>>,
}

/// Immutable, validated model table
#[derive(Debug, Clone, Default)]
pub struct ModelTable {
    version: Option<String>,
    velocity_markers: DistanceModels,
    race_times: DistanceModels,
    training_paces: BTreeMap<ZoneKey, ZoneModels>,
}

impl ModelTable {
    /// Read and validate a table from disk
    ///
    /// # Errors
    ///
    /// Returns `ModelTableError` if the file is missing, unreadable, not a
    /// valid table, empty, or lacks a required category
    pub fn load(path: &Path) -> Result<Self, ModelTableError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ModelTableError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ModelTableError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        let table = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            version = table.version().unwrap_or("unversioned"),
            velocity_marker_distances = table.velocity_markers.len(),
            race_time_distances = table.race_times.len(),
            training_pace_zones = table.training_paces.len(),
            "Loaded model table"
        );
        Ok(table)
    }

    /// Parse and validate a table document
    ///
    /// # Errors
    ///
    /// Returns `ModelTableError` if the document is invalid, empty, or lacks
    /// a required category
    pub fn from_json_str(text: &str) -> Result<Self, ModelTableError> {
        let raw: RawModelTable = serde_json::from_str(text)?;

        if raw.version.is_none()
            && raw.velocity_markers.is_none()
            && raw.race_times.is_none()
            && raw.training_paces.is_none()
        {
            return Err(ModelTableError::Empty);
        }

        let mut missing = Vec::new();
        if raw.velocity_markers.as_ref().is_none_or(BTreeMap::is_empty) {
            missing.push(ModelCategory::VelocityMarkers.as_str());
        }
        if raw.race_times.as_ref().is_none_or(BTreeMap::is_empty) {
            missing.push(ModelCategory::RaceTimes.as_str());
        }
        if raw.training_paces.as_ref().is_none_or(Vec::is_empty) {
            missing.push(ModelCategory::TrainingPaces.as_str());
        }
        if !missing.is_empty() {
            return Err(ModelTableError::MissingCategories(missing));
        }

        let mut training_paces = BTreeMap::new();
        for entry in raw.training_paces.unwrap_or_default() {
            let key = ZoneKey::new(entry.zone_group, entry.zone_type, entry.zone_distance);
            if training_paces.insert(key.clone(), entry.models).is_some() {
                warn!(zone = %key, "Duplicate training pace zone in model table, keeping the last");
            }
        }

        Ok(Self {
            version: raw.version,
            velocity_markers: raw.velocity_markers.unwrap_or_default(),
            race_times: raw.race_times.unwrap_or_default(),
            training_paces,
        })
    }

    /// Artifact version string, if declared
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Distance-keyed models for a category; `None` for zone-keyed training paces
    #[must_use]
    pub const fn distance_models(&self, category: ModelCategory) -> Option<&DistanceModels> {
        match category {
            ModelCategory::VelocityMarkers => Some(&self.velocity_markers),
            ModelCategory::RaceTimes => Some(&self.race_times),
            ModelCategory::TrainingPaces => None,
        }
    }

    /// Sorted reference distances available in a category
    ///
    /// For training paces this is the union across every zone.
    #[must_use]
    pub fn distances(&self, category: ModelCategory) -> Vec<u32> {
        match self.distance_models(category) {
            Some(models) => models.keys().copied().collect(),
            None => {
                let mut distances: Vec<u32> = self
                    .training_paces
                    .values()
                    .flat_map(|models| models.keys().copied())
                    .collect();
                distances.sort_unstable();
                distances.dedup();
                distances
            }
        }
    }

    /// All zone keys in output order
    pub fn zone_keys(&self) -> impl Iterator<Item = &ZoneKey> {
        self.training_paces.keys()
    }

    /// Distance-keyed fast/slow models for one zone
    #[must_use]
    pub fn zone_models(&self, key: &ZoneKey) -> Option<&ZoneModels> {
        self.training_paces.get(key)
    }
}
