// ABOUTME: Centralized resource container for dependency injection in the MCP server
// ABOUTME: Holds the environment configuration and the lazily loaded fitted-model table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Server Resources Module
//!
//! Centralized resource container shared by every tool call. Built once at
//! startup and handed to tools through `ToolExecutionContext`.

use std::sync::Arc;

use runcalc_intelligence::models::{ModelManager, ModelTable};
use tracing::{info, warn};

use crate::config::environment::ServerConfig;
use crate::errors::AppResult;

/// Centralized resource container for dependency injection
#[derive(Debug, Clone)]
pub struct ServerResources {
    /// Environment configuration
    pub config: Arc<ServerConfig>,
    /// Owner of the fitted-model table
    pub model_manager: Arc<ModelManager>,
}

impl ServerResources {
    /// Create resources reading the model table lazily from the configured path
    #[must_use]
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let model_manager = Arc::new(ModelManager::new(config.model_table_path.clone()));
        Self {
            config,
            model_manager,
        }
    }

    /// Create resources over an in-memory model table
    #[must_use]
    pub fn with_model_table(config: Arc<ServerConfig>, table: ModelTable) -> Self {
        Self {
            config,
            model_manager: Arc::new(ModelManager::from_table(table)),
        }
    }

    /// Load the model table now instead of on the first fitted-model call
    ///
    /// A failure here is logged and returned; closed-form tools keep working
    /// and fitted-model tools report the failure when called.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadingFailed` if the table cannot be loaded
    pub fn preload_models(&self) -> AppResult<()> {
        match self.model_manager.table() {
            Ok(table) => {
                info!(
                    version = table.version().unwrap_or("unversioned"),
                    "Model table preloaded"
                );
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "Model table preload failed; fitted-model tools will report it");
                Err(error)
            }
        }
    }
}
