// ABOUTME: MCP request processing and protocol handling for the Runcalc server
// ABOUTME: Validates, routes, and executes MCP protocol requests with proper error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::tools::{ToolExecutionContext, ToolRegistry};

use super::resources::ServerResources;
use super::schema::{InitializeResult, ToolCall, ToolResponse, MCP_PROTOCOL_VERSION};

/// Length of the params preview written to debug logs
const PARAMS_PREVIEW_CHARS: usize = 100;

/// Processes MCP protocol requests with validation, routing, and execution
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
    registry: Arc<ToolRegistry>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            resources,
            registry,
        }
    }

    /// Handle one raw JSON-RPC message
    ///
    /// Returns `None` for notifications. Text that is not JSON yields a
    /// parse error with a null id; JSON that is not a request yields an
    /// invalid-request error.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    Some(Value::Null),
                    error_codes::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse MCP request: {}", e);
                Some(JsonRpcResponse::error(
                    Some(id.unwrap_or(Value::Null)),
                    error_codes::INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ))
            }
        }
    }

    /// Handle an MCP request and return a response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();

        Self::log_request(&request);

        if request.is_notification() {
            Self::handle_notification(&request);
            Self::log_completion("notification", start_time);
            return None;
        }

        let response = match self.process_request(&request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(&request, &e),
        };

        Self::log_completion("request", start_time);
        Some(response)
    }

    fn create_error_response(request: &JsonRpcRequest, e: &AppError) -> JsonRpcResponse {
        if e.code.is_input_error() {
            debug!(
                mcp_method = %request.method,
                mcp_id = ?request.id,
                error = %e,
                "Rejected MCP request"
            );
        } else {
            error!(
                "Failed to process MCP request: {} | Request: method={}, id={:?}",
                e, request.method, request.id
            );
        }
        JsonRpcResponse::from_app_error(request.id.clone(), e)
    }

    /// Process an MCP request and generate response
    async fn process_request(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        Self::validate_request(request)?;

        match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize(request)),
            "ping" => Ok(Self::handle_ping(request)),
            "tools/list" => Ok(self.handle_tools_list(request)),
            "tools/call" => self.handle_tools_call(request).await,
            _ => Ok(Self::handle_unknown_method(request)),
        }
    }

    /// Validate MCP request format and required fields
    fn validate_request(request: &JsonRpcRequest) -> AppResult<()> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(AppError::invalid_input(format!(
                "Invalid JSON-RPC version: got '{}', expected '{}'",
                request.jsonrpc, JSONRPC_VERSION
            )));
        }

        if request.method.is_empty() {
            return Err(AppError::invalid_input("Missing method"));
        }

        Ok(())
    }

    /// Handle MCP initialize request
    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling initialize request");

        let result = InitializeResult::new(
            MCP_PROTOCOL_VERSION.to_owned(),
            self.resources.config.service_name.clone(),
            env!("CARGO_PKG_VERSION").to_owned(),
        );

        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
            Err(e) => Self::create_error_response(request, &AppError::from(e)),
        }
    }

    /// Handle MCP ping request
    fn handle_ping(request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling ping request");
        JsonRpcResponse::success(request.id.clone(), json!({}))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling tools/list request");

        let tools = self.registry.all_schemas();
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        let params = request
            .params
            .clone()
            .ok_or_else(|| AppError::invalid_input("Missing parameters for tools/call"))?;
        let call: ToolCall = serde_json::from_value(params).map_err(|e| {
            AppError::invalid_input(format!("Invalid tools/call parameters: {e}"))
        })?;

        debug!(tool = %call.name, "Handling tools/call request");

        let mut context = ToolExecutionContext::new(Arc::clone(&self.resources));
        if let Some(id) = request.id.clone() {
            context = context.with_request_id(id);
        }

        let arguments = call.arguments.unwrap_or_else(|| json!({}));
        let result = self
            .registry
            .execute(&call.name, arguments, &context)
            .await?;

        let response = ToolResponse::from_json(result.content, result.is_error)?;
        Ok(JsonRpcResponse::success(
            request.id.clone(),
            serde_json::to_value(&response)?,
        ))
    }

    /// Handle unknown method
    fn handle_unknown_method(request: &JsonRpcRequest) -> JsonRpcResponse {
        warn!("Unknown MCP method: {}", request.method);

        JsonRpcResponse::error(
            request.id.clone(),
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown method: {}", request.method),
        )
    }

    /// Handle notification (no response required)
    fn handle_notification(request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client initialized"),
            "notifications/cancelled" => debug!("Request cancelled notification received"),
            method => debug!("Unhandled notification: {}", method),
        }
    }

    /// Log incoming request with a truncated params preview
    fn log_request(request: &JsonRpcRequest) {
        debug!(
            mcp_method = %request.method,
            mcp_id = ?request.id,
            mcp_params_preview = ?request.params.as_ref().map(|p| {
                let s = p.to_string();
                if s.chars().count() > PARAMS_PREVIEW_CHARS {
                    let preview: String = s.chars().take(PARAMS_PREVIEW_CHARS).collect();
                    format!("{preview}...[truncated]")
                } else {
                    s
                }
            }),
            "Received MCP request"
        );
    }

    /// Log request completion with timing
    fn log_completion(request_type: &str, start_time: Instant) {
        let duration = start_time.elapsed();
        debug!(
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "Completed MCP {} processing", request_type
        );
    }
}
