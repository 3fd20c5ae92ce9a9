// ABOUTME: Defines ToolExecutionContext which provides tools with access to shared server resources.
// ABOUTME: Carries the JSON-RPC request id for tracing alongside the Arc'd resource container.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Tool Execution Context
//!
//! Provides a unified context object for tool execution, containing:
//! - Access to shared server resources (configuration, model table)
//! - Request tracing information

use std::fmt;
use std::sync::Arc;

use runcalc_intelligence::fitted::FittedModelEngine;
use runcalc_intelligence::models::ModelManager;
use runcalc_intelligence::ValidationLimits;
use serde_json::Value;

use crate::config::environment::ServerConfig;
use crate::mcp::resources::ServerResources;

/// Context provided to every tool execution.
///
/// The `resources` field is `Arc<ServerResources>` so concurrent tool calls
/// share one model table without copying it.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
    /// Access to all server resources
    pub resources: Arc<ServerResources>,
}

impl ToolExecutionContext {
    /// Create a new context over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            request_id: None,
            resources,
        }
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Get a reference to the server configuration
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.resources.config
    }

    /// Get a reference to the fitted-model table owner
    #[must_use]
    pub fn model_manager(&self) -> &ModelManager {
        &self.resources.model_manager
    }

    /// Validation limits for race performances
    #[must_use]
    pub fn limits(&self) -> ValidationLimits {
        self.resources.config.limits
    }

    /// Fitted-model engine over the shared table and configured limits
    #[must_use]
    pub fn fitted_engine(&self) -> FittedModelEngine<'_> {
        FittedModelEngine::new(&self.resources.model_manager, self.limits())
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("request_id", &self.request_id)
            .field("resources", &"<ServerResources>")
            .finish()
    }
}
