// ABOUTME: Heart-rate zone tool by percent of max HR and percent of HR reserve.
// ABOUTME: Implements heart_rate_zones with an optional measured max heart rate.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use std::collections::HashMap;

use async_trait::async_trait;
use runcalc_intelligence::heart_rate::heart_rate_zones;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{optional_number, required_number};

/// Tool computing heart-rate training zones.
pub struct HeartRateZonesTool;

#[async_trait]
impl McpTool for HeartRateZonesTool {
    fn name(&self) -> &'static str {
        "heart_rate_zones"
    }

    fn description(&self) -> &'static str {
        "Calculate heart-rate training zones from age and resting heart rate; max heart rate is estimated from age unless supplied"
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            "age".to_owned(),
            PropertySchema::typed("number", "Age in years"),
        );
        properties.insert(
            "resting_heart_rate".to_owned(),
            PropertySchema::typed("number", "Resting heart rate in BPM"),
        );
        properties.insert(
            "max_heart_rate".to_owned(),
            PropertySchema::typed("number", "Measured max heart rate in BPM (optional)"),
        );
        JsonSchema::object(properties, &["age", "resting_heart_rate"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::ANALYTICS | ToolCapabilities::CLOSED_FORM
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let age = required_number(&args, "age")?;
        let resting_heart_rate = required_number(&args, "resting_heart_rate")?;
        let max_heart_rate = optional_number(&args, "max_heart_rate")?;

        let zones = heart_rate_zones(age, resting_heart_rate, max_heart_rate)?;
        Ok(ToolResult::from_serializable(&zones)?)
    }
}

/// Create all heart-rate tools for registration
#[must_use]
pub fn create_heart_rate_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(HeartRateZonesTool)]
}
