// ABOUTME: Core types and constants for the Runcalc running-metrics server
// ABOUTME: Foundation crate with error handling, race catalog, formatters, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

#![deny(unsafe_code)]

//! # Runcalc Core
//!
//! Foundation crate providing shared types and constants for the Runcalc
//! calculators. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Published formula coefficients and validation defaults
//! - **`race_catalog`**: Canonical race events and their distances
//! - **formatters**: Clock-string formatting for paces and race times

/// Unified error handling system with standard error codes
pub mod errors;

/// Formula coefficients and defaults organized by domain
pub mod constants;

/// Canonical race events and distances
pub mod race_catalog;

/// Clock-string formatting for paces, splits, and race times
pub mod formatters;
