// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration; there are no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Configuration module for the Runcalc MCP server

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, ServerConfig};
