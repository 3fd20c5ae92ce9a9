// ABOUTME: Central registry for MCP tools with category grouping, lookup, and execution.
// ABOUTME: Registers the built-in closed-form, fitted-model and conversion tools at startup.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Tool Registry
//!
//! Central registry for MCP tools, providing:
//! - Tool registration and lookup
//! - Category grouping
//! - Schema generation for MCP tools/list responses
//! - Dispatch of `tools/call` by name

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::errors::ToolError;
use super::implementations::closed_form::create_closed_form_tools;
use super::implementations::conversion::create_conversion_tools;
use super::implementations::fitted_model::create_fitted_model_tools;
use super::implementations::heart_rate::create_heart_rate_tools;
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Category for tools built on published closed-form formulas
pub const CLOSED_FORM_CATEGORY: &str = "closed_form";
/// Category for tools reading the fitted-model table
pub const FITTED_MODEL_CATEGORY: &str = "fitted_model";
/// Category for unit conversion tools
pub const CONVERSION_CATEGORY: &str = "conversion";

/// Central registry for MCP tools.
///
/// The registry is built once at startup and then used immutably for tool
/// lookups. All registered tools are `Arc`-wrapped for sharing across async
/// tasks. Schemas are listed in registration order.
///
/// # Example
///
/// ```
/// use runcalc_mcp_server::tools::registry::ToolRegistry;
///
/// let mut registry = ToolRegistry::new();
/// registry.register_builtin_tools();
///
/// assert!(registry.contains("calculate_vdot"));
/// assert_eq!(registry.all_schemas().len(), registry.len());
/// ```
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Tool names in registration order
    order: Vec<String>,
    /// Tool categories for organization
    categories: HashMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
            categories: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name.clone(), tool);
        self.order.push(name);
        true
    }

    /// Register a tool and file it under a category
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) -> bool {
        let name = tool.name().to_owned();
        if !self.register(tool) {
            return false;
        }
        self.categories
            .entry(category.to_owned())
            .or_default()
            .push(name);
        true
    }

    /// Register a tool, failing if the name is taken
    ///
    /// # Errors
    ///
    /// Returns `ToolError::AlreadyRegistered` if a tool with the same name exists
    pub fn try_register(&mut self, tool: Arc<dyn McpTool>) -> Result<(), ToolError> {
        let name = tool.name();
        if self.tools.contains_key(name) {
            return Err(ToolError::already_registered(name));
        }
        self.register(tool);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn McpTool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names in registration order
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Tool names filed under `category`
    #[must_use]
    pub fn tools_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Known categories, sorted
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    /// Schemas of every registered tool, for `tools/list`
    #[must_use]
    pub fn all_schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Tools declaring every capability in `required`
    #[must_use]
    pub fn filter_by_capabilities(&self, required: ToolCapabilities) -> Vec<&Arc<dyn McpTool>> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .filter(|tool| tool.capabilities().contains(required))
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its execution fails
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;

        let started = Instant::now();
        let result = tool.execute(args, context).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(output) => AppLogger::log_mcp_tool_call(name, !output.is_error, duration_ms),
            Err(error) => {
                debug!(tool = name, error = %error, "Tool returned an error");
                AppLogger::log_mcp_tool_call(name, false, duration_ms);
            }
        }
        result
    }

    /// Register all built-in tools
    pub fn register_builtin_tools(&mut self) {
        info!("Registering built-in tools...");

        self.register_closed_form_tools();
        self.register_fitted_model_tools();
        self.register_conversion_tools();

        info!("Registered {} built-in tools", self.len());
    }

    /// Register VDOT, training pace, race prediction and heart-rate tools
    fn register_closed_form_tools(&mut self) {
        debug!(
            "Registering closed-form tools (registry has {} tools)",
            self.tools.len()
        );

        for tool in create_closed_form_tools()
            .into_iter()
            .chain(create_heart_rate_tools())
        {
            self.register_with_category(Arc::from(tool), CLOSED_FORM_CATEGORY);
        }
    }

    /// Register velocity marker, race time and zone tools
    fn register_fitted_model_tools(&mut self) {
        debug!(
            "Registering fitted-model tools (registry has {} tools)",
            self.tools.len()
        );

        for tool in create_fitted_model_tools() {
            self.register_with_category(Arc::from(tool), FITTED_MODEL_CATEGORY);
        }
    }

    /// Register unit conversion tools
    fn register_conversion_tools(&mut self) {
        debug!(
            "Registering conversion tools (registry has {} tools)",
            self.tools.len()
        );

        for tool in create_conversion_tools() {
            self.register_with_category(Arc::from(tool), CONVERSION_CATEGORY);
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tool_names())
            .field("categories", &self.categories())
            .finish()
    }
}
