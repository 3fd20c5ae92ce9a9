// ABOUTME: Running performance prediction engine for the Runcalc MCP server
// ABOUTME: Closed-form Daniels/Riegel models, fitted polynomial models, zone interpolation, HR zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![deny(unsafe_code)]

//! # Runcalc Intelligence
//!
//! Numeric engine behind the Runcalc tools. Everything in this crate is a
//! pure function of its inputs, except the fitted-model table which is read
//! from disk at most once per [`models::ModelManager`].
//!
//! ## Modules
//!
//! - **daniels**: VDOT estimation, training paces and race prediction
//! - **riegel**: Power-law race time scaling
//! - **conversions**: Pace and speed unit conversions
//! - **validation**: Plausibility limits for race performances
//! - **models**: Fitted-model table loading and lookup
//! - **fitted**: Velocity markers and race predictions from fitted models
//! - **zones**: Training pace zones interpolated across model distances
//! - **`heart_rate`**: Age-predicted max heart rate and heart-rate zones
//! - **ordered**: Name-keyed entries that serialize in insertion order

/// Pace and speed unit conversions
pub mod conversions;

/// Jack Daniels' VDOT model
pub mod daniels;

/// Riegel power-law race time scaling
pub mod riegel;

/// Performance plausibility limits
pub mod validation;

/// Fitted-model table and its lazily loaded manager
pub mod models;

/// Velocity markers and race predictions from fitted models
pub mod fitted;

/// Training pace zones from fitted models
pub mod zones;

/// Heart-rate zone calculator
pub mod heart_rate;

/// Insertion-ordered named entries for zone reports
pub mod ordered;

pub use conversions::{convert, parse_pace_string, PaceUnit};
pub use daniels::{DanielsModel, TrainingPaces};
pub use models::{ModelManager, ModelTable};
pub use ordered::OrderedEntries;
pub use validation::ValidationLimits;
