// ABOUTME: Fitted-model tools: velocity markers, catalog race times and training zones.
// ABOUTME: Failures are returned in-band as {"error": message} tool results.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Fitted-Model Tools
//!
//! - `VelocityMarkersTool` - vLT, CV and vVO2 paces
//! - `PredictRaceTimesTool` - every catalog race with a usable model
//! - `FittedTrainingPacesTool` - training zone tree interpolated across model distances
//!
//! These tools never fail at the protocol level. Any error, including a
//! missing or broken model table, comes back as a tool result flagged
//! `isError` whose content is `{"error": message}`.
//!
//! Until the table is loaded, calls run on tokio's blocking pool so the file
//! read never stalls a runtime worker.

use std::collections::HashMap;

use async_trait::async_trait;
use runcalc_core::formatters::format_pace_ms;
use serde_json::{json, Map, Value};
use tokio::task;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::required_number;

/// Schema shared by every fitted-model tool
fn performance_schema() -> JsonSchema {
    let mut properties = HashMap::new();
    properties.insert(
        "distance_meters".to_owned(),
        PropertySchema::typed("number", "Race distance in meters"),
    );
    properties.insert(
        "time_seconds".to_owned(),
        PropertySchema::typed("number", "Race time in seconds"),
    );
    JsonSchema::object(properties, &["distance_meters", "time_seconds"])
}

/// `(distance_meters, time_seconds)` from the arguments
fn performance_args(args: &Value) -> AppResult<(f64, f64)> {
    Ok((
        required_number(args, "distance_meters")?,
        required_number(args, "time_seconds")?,
    ))
}

/// Fold an outcome into the legacy in-band error envelope
fn into_envelope(tool: &str, outcome: AppResult<Value>) -> ToolResult {
    match outcome {
        Ok(content) => ToolResult::ok(content),
        Err(error) => {
            warn!(tool, code = ?error.code, error = %error, "Fitted-model tool failed");
            ToolResult::error(json!({ "error": error.message }))
        }
    }
}

/// Synchronous body of a fitted-model tool
type FittedRun = fn(&Value, &ToolExecutionContext) -> AppResult<Value>;

/// Run a fitted-model tool, moving it to the blocking pool while the table
/// still has to be read from disk
async fn execute_fitted(
    tool: &'static str,
    run: FittedRun,
    args: Value,
    ctx: &ToolExecutionContext,
) -> ToolResult {
    if ctx.model_manager().is_loaded() {
        return into_envelope(tool, run(&args, ctx));
    }

    debug!(tool, "Model table not loaded yet, running on the blocking pool");
    let ctx = ctx.clone();
    let outcome = task::spawn_blocking(move || run(&args, &ctx))
        .await
        .unwrap_or_else(|join_error| {
            Err(AppError::internal(format!(
                "Fitted-model task did not complete: {join_error}"
            )))
        });
    into_envelope(tool, outcome)
}

fn fitted_capabilities() -> ToolCapabilities {
    ToolCapabilities::ANALYTICS | ToolCapabilities::FITTED_MODEL
}

// ============================================================================
// VelocityMarkersTool
// ============================================================================

/// Tool predicting lactate threshold, critical velocity and VO2max paces.
pub struct VelocityMarkersTool;

impl VelocityMarkersTool {
    fn run(args: &Value, ctx: &ToolExecutionContext) -> AppResult<Value> {
        let (distance, time) = performance_args(args)?;
        let markers = ctx.fitted_engine().velocity_markers(distance, time)?;

        let content: Map<String, Value> = markers
            .into_iter()
            .map(|(marker, seconds_per_km)| {
                (
                    marker.key().to_owned(),
                    json!({
                        "pace": format_pace_ms(seconds_per_km as f64),
                        "description": marker.description(),
                    }),
                )
            })
            .collect();
        Ok(Value::Object(content))
    }
}

#[async_trait]
impl McpTool for VelocityMarkersTool {
    fn name(&self) -> &'static str {
        "velocity_markers"
    }

    fn description(&self) -> &'static str {
        "Predict velocity markers (lactate threshold vLT, critical velocity CV, vVO2max) as paces per km from one race performance, using fitted models"
    }

    fn input_schema(&self) -> JsonSchema {
        performance_schema()
    }

    fn capabilities(&self) -> ToolCapabilities {
        fitted_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(execute_fitted(self.name(), Self::run, args, ctx).await)
    }
}

// ============================================================================
// PredictRaceTimesTool
// ============================================================================

/// Tool predicting every catalog race from one performance.
pub struct PredictRaceTimesTool;

impl PredictRaceTimesTool {
    fn run(args: &Value, ctx: &ToolExecutionContext) -> AppResult<Value> {
        let (distance, time) = performance_args(args)?;
        let predictions = ctx.fitted_engine().predict_all_race_times(distance, time)?;

        let content: Map<String, Value> = predictions
            .into_iter()
            .map(|(race, formatted)| (race, Value::String(formatted)))
            .collect();
        Ok(Value::Object(content))
    }
}

#[async_trait]
impl McpTool for PredictRaceTimesTool {
    fn name(&self) -> &'static str {
        "predict_race_times"
    }

    fn description(&self) -> &'static str {
        "Predict finish times (HH:MM:SS) for standard races from 100m to 100 miles from one race performance, using fitted models"
    }

    fn input_schema(&self) -> JsonSchema {
        performance_schema()
    }

    fn capabilities(&self) -> ToolCapabilities {
        fitted_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(execute_fitted(self.name(), Self::run, args, ctx).await)
    }
}

// ============================================================================
// FittedTrainingPacesTool
// ============================================================================

/// Tool computing the endurance/stamina/speed/sprint training zone tree.
pub struct FittedTrainingPacesTool;

impl FittedTrainingPacesTool {
    fn run(args: &Value, ctx: &ToolExecutionContext) -> AppResult<Value> {
        let (distance, time) = performance_args(args)?;
        let zones = ctx.fitted_engine().compute_training_paces(distance, time)?;
        serde_json::to_value(&zones).map_err(AppError::from)
    }
}

#[async_trait]
impl McpTool for FittedTrainingPacesTool {
    fn name(&self) -> &'static str {
        "fitted_training_paces"
    }

    fn description(&self) -> &'static str {
        "Compute training pace zones (endurance, stamina, speed, sprint) with pace ranges and interval splits from one race performance, using fitted models"
    }

    fn input_schema(&self) -> JsonSchema {
        performance_schema()
    }

    fn capabilities(&self) -> ToolCapabilities {
        fitted_capabilities()
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        Ok(execute_fitted(self.name(), Self::run, args, ctx).await)
    }
}

/// Create all fitted-model tools for registration
#[must_use]
pub fn create_fitted_model_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(VelocityMarkersTool),
        Box::new(PredictRaceTimesTool),
        Box::new(FittedTrainingPacesTool),
    ]
}
