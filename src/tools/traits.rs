// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # MCP Tool Trait and Capabilities
//!
//! This module defines the core abstraction for MCP tools. All tools implement
//! the `McpTool` trait which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags for filtering and discovery
//! - Async execution with context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools can declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool performs running-metric calculations
        const ANALYTICS = 0b0000_0001;
        /// Tool uses closed-form published formulas only
        const CLOSED_FORM = 0b0000_0010;
        /// Tool reads the fitted-model table
        const FITTED_MODEL = 0b0000_0100;
        /// Tool converts between units
        const CONVERSION = 0b0000_1000;
    }
}

impl ToolCapabilities {
    /// Check if tool performs analytics
    #[must_use]
    pub const fn is_analytics(self) -> bool {
        self.contains(Self::ANALYTICS)
    }

    /// Check if tool depends on the fitted-model table
    #[must_use]
    pub const fn requires_models(self) -> bool {
        self.contains(Self::FITTED_MODEL)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if self.contains(Self::ANALYTICS) {
            parts.push("analytics");
        }
        if self.contains(Self::CLOSED_FORM) {
            parts.push("closed_form");
        }
        if self.contains(Self::FITTED_MODEL) {
            parts.push("fitted_model");
        }
        if self.contains(Self::CONVERSION) {
            parts.push("conversion");
        }

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are registered with the `ToolRegistry` and dispatched by name from
/// `tools/call` requests.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use runcalc_mcp_server::tools::{McpTool, ToolCapabilities, ToolResult, ToolExecutionContext};
/// use runcalc_mcp_server::mcp::schema::JsonSchema;
/// use runcalc_mcp_server::errors::AppResult;
/// use serde_json::Value;
///
/// struct EchoDistanceTool;
///
/// #[async_trait]
/// impl McpTool for EchoDistanceTool {
///     fn name(&self) -> &'static str {
///         "echo_distance"
///     }
///
///     fn description(&self) -> &'static str {
///         "Echo a distance back to the caller"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema {
///             schema_type: "object".to_owned(),
///             properties: None,
///             required: None,
///         }
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::ANALYTICS
///     }
///
///     async fn execute(&self, args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::ok(args))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `calculate_vdot`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    ///
    /// This schema is returned in tools/list responses and used
    /// by clients to validate tool arguments.
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and discovery
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for invalid arguments or failed calculations
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
