// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Also holds the argument extraction helpers shared by every tool.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Tool Implementations
//!
//! - `closed_form` - VDOT, Daniels training paces, Riegel/Daniels race prediction
//! - `heart_rate` - Heart-rate zones
//! - `fitted_model` - Velocity markers, race times and training zones from fitted models
//! - `conversion` - Pace and speed unit conversion

/// `calculate_vdot`, `training_paces`, `predict_race_time`
pub mod closed_form;

/// `convert_pace`
pub mod conversion;

/// `velocity_markers`, `predict_race_times`, `fitted_training_paces`
pub mod fitted_model;

/// `heart_rate_zones`
pub mod heart_rate;

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Numeric argument `field`, failing if it is absent or not a number
pub(crate) fn required_number(args: &Value, field: &str) -> AppResult<f64> {
    args.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            AppError::invalid_input(format!("{field} is required and must be a number"))
                .with_context(field)
        })
}

/// Numeric argument `field` if present and not null
pub(crate) fn optional_number(args: &Value, field: &str) -> AppResult<Option<f64>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            AppError::invalid_input(format!("{field} must be a number")).with_context(field)
        }),
    }
}

/// String argument `field`, failing if it is absent or not a string
pub(crate) fn required_str<'a>(args: &'a Value, field: &str) -> AppResult<&'a str> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::invalid_input(format!("{field} is required and must be a string"))
                .with_context(field)
        })
}

/// Numeric argument `field` that must be strictly positive
pub(crate) fn positive_number(args: &Value, field: &str) -> AppResult<f64> {
    let value = required_number(args, field)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(
            AppError::invalid_input(format!("{field} must be positive, got {value}"))
                .with_context(field),
        )
    }
}

/// Round to `decimals` places, ties to even
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
