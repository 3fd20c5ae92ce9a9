// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads the model table path, validation limits, and startup options from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `RUNCALC_MODEL_TABLE` | `data/models.json` |
//! | `RUNCALC_MIN_DISTANCE_M` | 400 |
//! | `RUNCALC_MAX_DISTANCE_M` | 160934 |
//! | `RUNCALC_MIN_PACE_S_PER_KM` | 60 |
//! | `RUNCALC_MAX_PACE_S_PER_KM` | 1200 |
//! | `RUNCALC_PRELOAD_MODELS` | false |
//! | `SERVICE_NAME` | `runcalc-mcp-server` |
//! | `ENVIRONMENT` | development |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use runcalc_intelligence::ValidationLimits;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Model table path variable
pub const MODEL_TABLE_ENV: &str = "RUNCALC_MODEL_TABLE";
/// Minimum distance variable
pub const MIN_DISTANCE_ENV: &str = "RUNCALC_MIN_DISTANCE_M";
/// Maximum distance variable
pub const MAX_DISTANCE_ENV: &str = "RUNCALC_MAX_DISTANCE_M";
/// Fastest pace variable
pub const MIN_PACE_ENV: &str = "RUNCALC_MIN_PACE_S_PER_KM";
/// Slowest pace variable
pub const MAX_PACE_ENV: &str = "RUNCALC_MAX_PACE_S_PER_KM";
/// Eager model loading variable
pub const PRELOAD_MODELS_ENV: &str = "RUNCALC_PRELOAD_MODELS";
/// Service name variable
pub const SERVICE_NAME_ENV: &str = "SERVICE_NAME";
/// Deployment environment variable
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";

/// Default model table location
pub const DEFAULT_MODEL_TABLE: &str = "data/models.json";
/// Default service name
pub const DEFAULT_SERVICE_NAME: &str = "runcalc-mcp-server";

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Fitted-model table artifact
    pub model_table_path: PathBuf,
    /// Performance plausibility limits for fitted-model tools
    pub limits: ValidationLimits,
    /// Load the model table at startup instead of on first use
    pub preload_models: bool,
    /// Name reported in `initialize` and logs
    pub service_name: String,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_table_path: PathBuf::from(DEFAULT_MODEL_TABLE),
            limits: ValidationLimits::default(),
            preload_models: false,
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unparseable value or the
    /// resulting validation limits are inconsistent
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let defaults = ValidationLimits::default();
        let limits = ValidationLimits {
            min_distance_meters: parse_env_or(MIN_DISTANCE_ENV, defaults.min_distance_meters)?,
            max_distance_meters: parse_env_or(MAX_DISTANCE_ENV, defaults.max_distance_meters)?,
            min_pace_seconds_per_km: parse_env_or(MIN_PACE_ENV, defaults.min_pace_seconds_per_km)?,
            max_pace_seconds_per_km: parse_env_or(MAX_PACE_ENV, defaults.max_pace_seconds_per_km)?,
        };

        let config = Self {
            model_table_path: PathBuf::from(env_var_or(MODEL_TABLE_ENV, DEFAULT_MODEL_TABLE)),
            limits,
            preload_models: parse_bool_env(PRELOAD_MODELS_ENV)?,
            service_name: env_var_or(SERVICE_NAME_ENV, DEFAULT_SERVICE_NAME),
            environment: Environment::from_str_or_default(&env_var_or(ENVIRONMENT_ENV, "")),
        };
        config.validate()?;

        info!("{}", config.summary());
        Ok(config)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the limits are inconsistent or the service name is empty
    pub fn validate(&self) -> AppResult<()> {
        self.limits.validate()?;
        if self.service_name.trim().is_empty() {
            return Err(AppError::config("Service name must not be empty"));
        }
        Ok(())
    }

    /// One-line description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "service={} environment={} model_table={} preload_models={} distance={}..{}m pace={}..{}s/km",
            self.service_name,
            self.environment,
            self.model_table_path.display(),
            self.preload_models,
            self.limits.min_distance_meters,
            self.limits.max_distance_meters,
            self.limits.min_pace_seconds_per_km,
            self.limits.max_pace_seconds_per_km,
        )
    }
}

/// Value of `key`, or `default` when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse `key` as `T`, or `default` when unset or blank
fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid value '{raw}' for {key}: {e}")).with_context(key)
        }),
        _ => Ok(default),
    }
}

/// Boolean flag accepting true/false, 1/0, yes/no, on/off
fn parse_bool_env(key: &str) -> AppResult<bool> {
    let raw = env_var_or(key, "");
    match raw.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        other => Err(
            AppError::config(format!("Invalid boolean '{other}' for {key}")).with_context(key),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("TEST"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model_table_path, PathBuf::from(DEFAULT_MODEL_TABLE));
    }

    #[test]
    fn test_empty_service_name_is_rejected() {
        let config = ServerConfig {
            service_name: "  ".to_owned(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
