// ABOUTME: Unified error handling with standard error codes for all Runcalc components
// ABOUTME: Defines AppError, ErrorCode, and the AppResult alias shared across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Unified Error Handling System
//!
//! Centralized error type for the calculators, the fitted-model engine and the
//! MCP tool layer. Every failure carries an [`ErrorCode`] so callers can tell
//! bad input apart from missing model coverage or a broken model table.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller-supplied value violates a precondition
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required argument was not supplied
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A string value could not be parsed
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// A numeric value is outside its accepted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Named resource (tool, race, zone) does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Prediction models (5000-5999)
    /// Requested category/distance/key is absent from the model table
    #[serde(rename = "MODEL_NOT_FOUND")]
    ModelNotFound = 5000,
    /// Model table artifact is missing, empty, or unreadable
    #[serde(rename = "MODEL_LOADING_FAILED")]
    ModelLoadingFailed = 5001,
    /// Model record is malformed or evaluated to a non-finite value
    #[serde(rename = "PREDICTION_FAILED")]
    PredictionFailed = 5002,

    // Configuration (6000-6999)
    /// Environment configuration is invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// JSON serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// JSON-RPC error code used when this error reaches the protocol boundary
    #[must_use]
    pub const fn jsonrpc_code(self) -> i32 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::ValueOutOfRange => -32602,
            Self::ResourceNotFound => -32601,
            Self::ModelNotFound
            | Self::ModelLoadingFailed
            | Self::PredictionFailed
            | Self::ConfigError
            | Self::InternalError
            | Self::SerializationError => -32603,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ModelNotFound => "No prediction model covers the requested input",
            Self::ModelLoadingFailed => "The prediction model table could not be loaded",
            Self::PredictionFailed => "The prediction model failed to produce a value",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// True for the caller-input family of codes
    #[must_use]
    pub const fn is_input_error(self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::InvalidFormat
                | Self::ValueOutOfRange
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional context (argument name, model key, file path)
    pub context: Option<String>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Malformed string input (pace strings, unit names)
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Missing required argument
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{field} parameter required"),
        )
        .with_context(field)
    }

    /// Model coverage gap
    #[must_use]
    pub fn model_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelNotFound, message)
    }

    /// Model table could not be loaded
    #[must_use]
    pub fn model_loading(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelLoadingFailed, message)
    }

    /// Model evaluation failed
    #[must_use]
    pub fn prediction(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PredictionFailed, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// True when the failure comes from the model table rather than from caller input
    #[must_use]
    pub const fn is_model_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ModelNotFound | ErrorCode::ModelLoadingFailed | ErrorCode::PredictionFailed
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_jsonrpc_mapping() {
        assert_eq!(ErrorCode::InvalidInput.jsonrpc_code(), -32602);
        assert_eq!(ErrorCode::ResourceNotFound.jsonrpc_code(), -32601);
        assert_eq!(ErrorCode::PredictionFailed.jsonrpc_code(), -32603);
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("Distance must be positive");
        assert_eq!(
            error.to_string(),
            "The provided input is invalid: Distance must be positive"
        );
    }

    #[test]
    fn test_model_error_classification() {
        assert!(AppError::model_not_found("x").is_model_error());
        assert!(AppError::prediction("x").is_model_error());
        assert!(!AppError::invalid_input("x").is_model_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ModelNotFound).unwrap();
        assert_eq!(json, "\"MODEL_NOT_FOUND\"");
    }
}
