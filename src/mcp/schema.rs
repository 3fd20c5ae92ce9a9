// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Tool schemas, tool responses, content blocks, and the initialize handshake result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the MCP messages this server exchanges, so
//! protocol field names live in one place instead of hardcoded JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP protocol revision implemented by this server
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

/// Server Information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name reported to clients
    pub name: String,
    /// Server version reported to clients
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name used in `tools/call`
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema of the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `"object"` for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument name → property schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Names of required arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema over `properties` with the listed `required` names
    #[must_use]
    pub fn object(properties: HashMap<String, PropertySchema>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(properties),
            required: Some(required.iter().map(|&name| name.to_owned()).collect()),
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name, or a list of names for unions
    #[serde(rename = "type")]
    pub property_type: Value,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    /// Property with a single JSON type
    #[must_use]
    pub fn typed(property_type: &str, description: &str) -> Self {
        Self {
            property_type: Value::String(property_type.to_owned()),
            description: Some(description.to_owned()),
        }
    }

    /// Property accepting any of several JSON types
    #[must_use]
    pub fn one_of(property_types: &[&str], description: &str) -> Self {
        Self {
            property_type: Value::Array(
                property_types
                    .iter()
                    .map(|&name| Value::String(name.to_owned()))
                    .collect(),
            ),
            description: Some(description.to_owned()),
        }
    }
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool to invoke
    pub name: String,
    /// Arguments object
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Tool Response after execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Content blocks shown to the model
    pub content: Vec<Content>,
    /// Whether the tool reported an error
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// Machine-readable copy of the result
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolResponse {
    /// Response carrying `value` both as JSON text and as structured content
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `value` cannot be rendered as text
    pub fn from_json(value: Value, is_error: bool) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string(&value)?;
        Ok(Self {
            content: vec![Content::Text { text }],
            is_error,
            structured_content: Some(value),
        })
    }
}

/// Content types for MCP messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text block
    #[serde(rename = "text")]
    Text {
        /// Text body
        text: String,
    },
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server emits `tools/list_changed`
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Complete MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Negotiated protocol revision
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Advertised capabilities
    pub capabilities: ServerCapabilities,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Usage hints for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Initialize result advertising a fixed tool list
    #[must_use]
    pub fn new(protocol_version: String, server_name: String, server_version: String) -> Self {
        Self {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: server_name,
                version: server_version,
            },
            instructions: Some(
                "Running calculators: VDOT and Daniels training paces, Riegel and Daniels race \
                 prediction, fitted-model velocity markers, race times and training zones, \
                 heart-rate zones, and pace/speed unit conversion. Distances are meters and \
                 times are seconds."
                    .to_owned(),
            ),
        }
    }
}
