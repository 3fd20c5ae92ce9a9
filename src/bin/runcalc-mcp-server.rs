// ABOUTME: Stdio MCP server binary exposing the Runcalc running calculators
// ABOUTME: Parses CLI overrides, initializes logging, and serves JSON-RPC until stdin closes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Runcalc MCP Server Binary
//!
//! Reads line-delimited JSON-RPC from stdin and writes responses to stdout.
//! Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use runcalc_mcp_server::config::environment::ServerConfig;
use runcalc_mcp_server::logging::{LogFormat, LoggingConfig};
use runcalc_mcp_server::mcp::mcp_request_processor::McpRequestProcessor;
use runcalc_mcp_server::mcp::resources::ServerResources;
use runcalc_mcp_server::mcp::transport::StdioTransport;
use runcalc_mcp_server::tools::ToolRegistry;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "runcalc-mcp-server")]
#[command(version)]
#[command(about = "Runcalc - running performance calculators exposed as MCP tools over stdio")]
pub struct Args {
    /// Fitted-model table path (overrides `RUNCALC_MODEL_TABLE`)
    #[arg(long)]
    model_table: Option<PathBuf>,

    /// Log output format: json, pretty, compact (overrides `LOG_FORMAT`)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Load the model table at startup (overrides `RUNCALC_PRELOAD_MODELS`)
    #[arg(long)]
    preload_models: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging_config = LoggingConfig::from_env();
    if let Some(format) = args.log_format {
        logging_config = logging_config.with_format(format);
    }
    logging_config.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(model_table) = args.model_table {
        config.model_table_path = model_table;
    }
    if args.preload_models {
        config.preload_models = true;
    }

    info!("Starting Runcalc MCP Server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::new(Arc::new(config)));
    if resources.config.preload_models && resources.preload_models().is_err() {
        warn!("Continuing without a model table; closed-form tools remain available");
    }

    let mut registry = ToolRegistry::new();
    registry.register_builtin_tools();

    let processor = McpRequestProcessor::new(resources, Arc::new(registry));
    StdioTransport::new(processor).run().await?;

    info!("Runcalc MCP Server stopped");
    Ok(())
}
