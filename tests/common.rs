// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides fixture model table loading, server resources and tool contexts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `runcalc_mcp_server`

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use runcalc_intelligence::models::{ModelManager, ModelTable};
use runcalc_mcp_server::config::environment::ServerConfig;
use runcalc_mcp_server::mcp::mcp_request_processor::McpRequestProcessor;
use runcalc_mcp_server::mcp::resources::ServerResources;
use runcalc_mcp_server::tools::{ToolExecutionContext, ToolRegistry};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Path of the hand-built model table used across tests
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("model_table.json")
}

/// Fixture model table, parsed
pub fn fixture_table() -> ModelTable {
    ModelTable::load(&fixture_path()).expect("fixture model table loads")
}

/// Manager preloaded with the fixture table
pub fn fixture_manager() -> ModelManager {
    ModelManager::from_table(fixture_table())
}

/// Path of the model table shipped with the server
pub fn bundled_table_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("models.json")
}

/// Manager preloaded with the shipped model table
pub fn bundled_manager() -> ModelManager {
    ModelManager::from_table(ModelTable::load(&bundled_table_path()).expect("bundled model table loads"))
}

/// Server resources over the fixture table with default configuration
pub fn create_test_server_resources() -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::with_model_table(
        Arc::new(ServerConfig::default()),
        fixture_table(),
    ))
}

/// Server resources that will try to load a table from `path` on first use
pub fn create_lazy_server_resources(path: PathBuf) -> Arc<ServerResources> {
    init_test_logging();
    let config = ServerConfig {
        model_table_path: path,
        ..ServerConfig::default()
    };
    Arc::new(ServerResources::new(Arc::new(config)))
}

/// Tool context over the fixture table
pub fn create_test_context() -> ToolExecutionContext {
    ToolExecutionContext::new(create_test_server_resources())
}

/// Registry with every built-in tool
pub fn create_builtin_registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register_builtin_tools();
    Arc::new(registry)
}

/// Request processor over the fixture table and the built-in tools
pub fn create_test_processor() -> McpRequestProcessor {
    McpRequestProcessor::new(create_test_server_resources(), create_builtin_registry())
}
