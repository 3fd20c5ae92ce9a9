// ABOUTME: Closed-form running tools built on Daniels' VDOT model and Riegel's formula.
// ABOUTME: Implements calculate_vdot, training_paces, predict_race_time.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Closed-Form Tools
//!
//! - `CalculateVdotTool` - VDOT from one race performance
//! - `TrainingPacesTool` - Daniels training paces for a VDOT
//! - `PredictRaceTimeTool` - Riegel and Daniels predictions plus their average
//!
//! None of these tools touch the fitted-model table.

use std::collections::HashMap;

use async_trait::async_trait;
use runcalc_core::formatters::{format_hhmmss, format_pace_rounded};
use runcalc_intelligence::{riegel, DanielsModel};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{positive_number, round_to};

const PACE_FORMAT: &str = "min:sec/km";
const TIME_FORMAT: &str = "HH:MM:SS";

/// `{value, format}` for a pace in decimal minutes per km
fn pace_entry(minutes: f64) -> Value {
    json!({
        "value": format_pace_rounded(minutes),
        "format": PACE_FORMAT,
    })
}

/// `{value, format, time_seconds}` for a race time
fn race_time_entry(seconds: f64) -> Value {
    json!({
        "value": format_hhmmss(seconds),
        "format": TIME_FORMAT,
        "time_seconds": round_to(seconds, 1),
    })
}

// ============================================================================
// CalculateVdotTool
// ============================================================================

/// Tool estimating VDOT from a race performance.
pub struct CalculateVdotTool;

#[async_trait]
impl McpTool for CalculateVdotTool {
    fn name(&self) -> &'static str {
        "calculate_vdot"
    }

    fn description(&self) -> &'static str {
        "Calculate VDOT according to Jack Daniels from a race distance (meters) and time (seconds)"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "distance".to_owned(),
            PropertySchema::typed("number", "Distance in meters"),
        );
        properties.insert(
            "time".to_owned(),
            PropertySchema::typed("number", "Time in seconds"),
        );
        JsonSchema::object(properties, &["distance", "time"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::ANALYTICS | ToolCapabilities::CLOSED_FORM
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let distance = positive_number(&args, "distance")?;
        let time = positive_number(&args, "time")?;

        let vdot = DanielsModel::estimate_capacity(distance, time);
        debug!(distance, time, vdot, "Estimated VDOT");

        Ok(ToolResult::ok(json!({ "vdot": round_to(vdot, 1) })))
    }
}

// ============================================================================
// TrainingPacesTool
// ============================================================================

/// Tool deriving Daniels training paces from a VDOT.
pub struct TrainingPacesTool;

#[async_trait]
impl McpTool for TrainingPacesTool {
    fn name(&self) -> &'static str {
        "training_paces"
    }

    fn description(&self) -> &'static str {
        "Get recommended training paces per km (easy, marathon, threshold, interval, repetition) for a VDOT, based on Jack Daniels' formulas"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "vdot".to_owned(),
            PropertySchema::typed("number", "VDOT value"),
        );
        JsonSchema::object(properties, &["vdot"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::ANALYTICS | ToolCapabilities::CLOSED_FORM
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let vdot = positive_number(&args, "vdot")?;
        let paces = DanielsModel::training_paces(vdot);

        Ok(ToolResult::ok(json!({
            "easy": {
                "lower": pace_entry(paces.easy_lower),
                "upper": pace_entry(paces.easy_upper),
            },
            "marathon": pace_entry(paces.marathon),
            "threshold": pace_entry(paces.threshold),
            "interval": pace_entry(paces.interval),
            "repetition": pace_entry(paces.repetition),
        })))
    }
}

// ============================================================================
// PredictRaceTimeTool
// ============================================================================

/// Tool predicting a race time with Riegel's formula and Daniels' VDOT method.
pub struct PredictRaceTimeTool;

#[async_trait]
impl McpTool for PredictRaceTimeTool {
    fn name(&self) -> &'static str {
        "predict_race_time"
    }

    fn description(&self) -> &'static str {
        "Predict race time for a target distance from a current performance, using Riegel's formula and Jack Daniels' equivalent performance method"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "current_distance".to_owned(),
            PropertySchema::typed("number", "Distance of known performance in meters"),
        );
        properties.insert(
            "current_time".to_owned(),
            PropertySchema::typed("number", "Time of known performance in seconds"),
        );
        properties.insert(
            "target_distance".to_owned(),
            PropertySchema::typed("number", "Distance for race time prediction in meters"),
        );
        JsonSchema::object(
            properties,
            &["current_distance", "current_time", "target_distance"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::ANALYTICS | ToolCapabilities::CLOSED_FORM
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let current_distance = positive_number(&args, "current_distance")?;
        let current_time = positive_number(&args, "current_time")?;
        let target_distance = positive_number(&args, "target_distance")?;

        let riegel_time = riegel::predict_time(current_distance, current_time, target_distance);
        let daniels_time =
            DanielsModel::predict_time(current_distance, current_time, target_distance);
        let average_time = (riegel_time + daniels_time) / 2.0;

        Ok(ToolResult::ok(json!({
            "riegel": race_time_entry(riegel_time),
            "daniels": race_time_entry(daniels_time),
            "average": race_time_entry(average_time),
        })))
    }
}

/// Create all closed-form tools for registration
#[must_use]
pub fn create_closed_form_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(CalculateVdotTool),
        Box::new(TrainingPacesTool),
        Box::new(PredictRaceTimeTool),
    ]
}
