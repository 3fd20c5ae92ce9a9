// ABOUTME: Model Context Protocol (MCP) implementation for AI assistant integration
// ABOUTME: Schema types, request processing, shared resources, and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

/// Request validation and routing
pub mod mcp_request_processor;
/// Shared resources handed to tools
pub mod resources;
/// MCP message schemas
pub mod schema;
/// Line-delimited stdio transport
pub mod transport;
