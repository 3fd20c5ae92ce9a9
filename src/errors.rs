// ABOUTME: Error types for the MCP server crate, shared with the engine crates
// ABOUTME: Re-exports AppError, ErrorCode and AppResult from runcalc-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

//! # Unified Error Handling System
//!
//! The server uses the same [`AppError`] as the engine crates so a failure
//! keeps its [`ErrorCode`] all the way to the JSON-RPC boundary.

pub use runcalc_core::errors::{AppError, AppResult, ErrorCode};
