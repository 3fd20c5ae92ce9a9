// ABOUTME: Unit conversion tool between pace (min/km, min/mile) and speed (km/h, mph).
// ABOUTME: Implements convert_pace, accepting numbers or M:SS pace strings.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use std::collections::HashMap;

use async_trait::async_trait;
use runcalc_core::formatters::{format_pace_truncated, format_speed};
use runcalc_intelligence::{convert, parse_pace_string, PaceUnit};
use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{required_str, round_to};

/// Read `value` as decimal minutes or a speed, depending on `unit`
fn parse_value(value: Option<&Value>, unit: PaceUnit) -> AppResult<f64> {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| AppError::invalid_input("value must be a finite number")),
        Some(Value::String(text)) if unit.is_pace() && text.contains(':') => {
            parse_pace_string(text)
        }
        Some(Value::String(text)) => text.trim().parse::<f64>().map_err(|_| {
            AppError::invalid_input(format!("value '{text}' is not a number")).with_context("value")
        }),
        _ => Err(
            AppError::invalid_input("value is required and must be a number or a M:SS pace string")
                .with_context("value"),
        ),
    }
}

/// Tool converting between pace and speed units.
pub struct ConvertPaceTool;

#[async_trait]
impl McpTool for ConvertPaceTool {
    fn name(&self) -> &'static str {
        "convert_pace"
    }

    fn description(&self) -> &'static str {
        "Convert between pace and speed units: min_km, min_mile, kmh, mph. Paces may be given as M:SS strings"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "value".to_owned(),
            PropertySchema::one_of(
                &["number", "string"],
                "Value to convert; paces accept decimal minutes or M:SS",
            ),
        );
        properties.insert(
            "from_unit".to_owned(),
            PropertySchema::typed("string", "Source unit: min_km, min_mile, kmh, mph"),
        );
        properties.insert(
            "to_unit".to_owned(),
            PropertySchema::typed("string", "Target unit: min_km, min_mile, kmh, mph"),
        );
        JsonSchema::object(properties, &["value", "from_unit", "to_unit"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::CONVERSION
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let from: PaceUnit = required_str(&args, "from_unit")?.parse()?;
        let to: PaceUnit = required_str(&args, "to_unit")?.parse()?;
        let value = parse_value(args.get("value"), from)?;

        let converted = convert(value, from, to)?;
        let formatted = if to.is_pace() {
            format_pace_truncated(converted)
        } else {
            format_speed(converted)
        };

        Ok(ToolResult::ok(json!({
            "value": round_to(converted, 3),
            "formatted": formatted,
            "unit": to.as_str(),
        })))
    }
}

/// Create all conversion tools for registration
#[must_use]
pub fn create_conversion_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(ConvertPaceTool)]
}
