// ABOUTME: Pluggable MCP tool architecture: trait, registry, context, results, and implementations.
// ABOUTME: Tools are registered once at startup and dispatched by name from tools/call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Tools
//!
//! Every calculator is exposed as an [`McpTool`] registered in a
//! [`ToolRegistry`]. Tools receive their arguments as JSON plus a
//! [`ToolExecutionContext`] carrying the shared server resources.

/// Execution context handed to tools
pub mod context;
/// Tool-specific error types
pub mod errors;
/// Built-in tool implementations
pub mod implementations;
/// Tool registry and dispatch
pub mod registry;
/// Tool result type
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
