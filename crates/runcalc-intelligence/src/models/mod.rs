// ABOUTME: Fitted-model table module: artifact schema, polynomial evaluation, and lazy manager
// ABOUTME: Re-exports the table types and the ModelManager ownership object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

/// Lazily loaded, shared model table owner
pub mod manager;

/// Model table artifact schema and loader
pub mod table;

pub use manager::ModelManager;
pub use table::{
    DistanceModels, FastSlowModels, FittedModel, ModelCategory, ModelSpec, ModelTable,
    ModelTableError, ZoneGroup, ZoneKey, ZoneModels,
};
