// ABOUTME: Main library entry point for the Runcalc MCP server
// ABOUTME: Exposes running-metric calculators as MCP tools over line-delimited JSON-RPC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![deny(unsafe_code)]

//! # Runcalc MCP Server
//!
//! A Model Context Protocol (MCP) server for running performance metrics:
//! VDOT and Daniels training paces, Riegel/Daniels race prediction,
//! fitted-model velocity markers, race times and training zones,
//! heart-rate zones, and pace/speed unit conversion.
//!
//! ## Architecture
//!
//! - **`runcalc-core`**: Errors, constants, race catalog, formatters
//! - **`runcalc-intelligence`**: Closed-form and fitted-model engines
//! - **tools**: `McpTool` implementations and the `ToolRegistry`
//! - **mcp**: Schema types, request processing, stdio transport
//! - **config**: Environment configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use runcalc_mcp_server::config::environment::ServerConfig;
//! use runcalc_mcp_server::errors::AppResult;
//! use runcalc_mcp_server::mcp::mcp_request_processor::McpRequestProcessor;
//! use runcalc_mcp_server::mcp::resources::ServerResources;
//! use runcalc_mcp_server::mcp::transport::StdioTransport;
//! use runcalc_mcp_server::tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let resources = Arc::new(ServerResources::new(config));
//!
//!     let mut registry = ToolRegistry::new();
//!     registry.register_builtin_tools();
//!
//!     let processor = McpRequestProcessor::new(resources, Arc::new(registry));
//!     StdioTransport::new(processor).run().await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Error types shared with the engine crates
pub mod errors;

/// JSON-RPC 2.0 request and response types
pub mod jsonrpc;

/// Structured logging setup
pub mod logging;

/// MCP schema, request processing, and transport
pub mod mcp;

/// MCP tools and their registry
pub mod tools;
