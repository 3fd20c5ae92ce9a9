// ABOUTME: Owns the fitted-model table: loads it once on first use and serves read-only lookups
// ABOUTME: Race-free lazy initialization; lookup failures name what is missing and what exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use runcalc_core::errors::{AppError, AppResult};
use tracing::debug;

use super::table::{ModelCategory, ModelSpec, ModelTable, ZoneKey, ZoneModels};

/// Shared owner of the model table
///
/// The table is read from `source` on the first call that needs it. Loading is
/// serialized so concurrent first calls read the file once; a failed load is
/// not cached and the next call tries again. Once loaded the table is never
/// mutated. Use [`ModelManager::reload`] to obtain a manager with fresh data.
pub struct ModelManager {
    source: Option<PathBuf>,
    table: OnceLock<Arc<ModelTable>>,
    load_guard: Mutex<()>,
}

impl fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelManager")
            .field("source", &self.source)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl ModelManager {
    /// Manager that loads lazily from a file
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            table: OnceLock::new(),
            load_guard: Mutex::new(()),
        }
    }

    /// Manager over an already-built table
    #[must_use]
    pub fn from_table(table: ModelTable) -> Self {
        Self {
            source: None,
            table: OnceLock::from(Arc::new(table)),
            load_guard: Mutex::new(()),
        }
    }

    /// Artifact path, if this manager reads from disk
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether the table has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The loaded table, reading it from disk on first use
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadingFailed` if the artifact is missing, unreadable,
    /// corrupt, empty, or lacks a required category
    pub fn table(&self) -> AppResult<Arc<ModelTable>> {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let path = self
            .source
            .as_deref()
            .ok_or_else(|| AppError::model_loading("No model table source configured"))?;
        debug!(path = %path.display(), "Loading model table");
        let loaded = Arc::new(ModelTable::load(path)?);
        Ok(Arc::clone(self.table.get_or_init(|| loaded)))
    }

    /// New manager reading the same source from scratch
    ///
    /// Readers holding this manager keep their current table.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadingFailed` if the artifact cannot be loaded
    pub fn reload(&self) -> AppResult<Self> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| AppError::model_loading("No model table source configured"))?;
        let manager = Self::new(source);
        manager.table()?;
        Ok(manager)
    }

    /// Look up one model
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` naming the missing category, distance, or key
    /// along with what is available, or `ModelLoadingFailed` if the table
    /// cannot be loaded
    pub fn get_model(
        &self,
        category: ModelCategory,
        distance: u32,
        key: &str,
    ) -> AppResult<ModelSpec> {
        let table = self.table()?;
        let models = table.distance_models(category).ok_or_else(|| {
            AppError::model_not_found(format!(
                "Model category '{category}' is keyed by training zone, not by distance and key"
            ))
        })?;

        let at_distance = models.get(&distance).ok_or_else(|| {
            let available: Vec<u32> = models.keys().copied().collect();
            AppError::model_not_found(format!(
                "No models found for distance {distance}m in category '{category}'. Available distances: {available:?}"
            ))
        })?;

        at_distance.get(key).cloned().ok_or_else(|| {
            let available: Vec<&str> = at_distance.keys().map(String::as_str).collect();
            AppError::model_not_found(format!(
                "Model key '{key}' not found for {distance}m in category '{category}'. Available keys: {available:?}"
            ))
        })
    }

    /// Sorted reference distances for a category
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` if the category has no models, or
    /// `ModelLoadingFailed` if the table cannot be loaded
    pub fn available_distances(&self, category: ModelCategory) -> AppResult<Vec<u32>> {
        let distances = self.table()?.distances(category);
        if distances.is_empty() {
            return Err(AppError::model_not_found(format!(
                "No models available for {category}."
            )));
        }
        Ok(distances)
    }

    /// All training pace zone keys in output order
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadingFailed` if the table cannot be loaded
    pub fn training_pace_zones(&self) -> AppResult<Vec<ZoneKey>> {
        Ok(self.table()?.zone_keys().cloned().collect())
    }

    /// Distance-keyed fast/slow models for a zone, `None` if the zone is unknown
    ///
    /// # Errors
    ///
    /// Returns `ModelLoadingFailed` if the table cannot be loaded
    pub fn training_pace_models(&self, zone: &ZoneKey) -> AppResult<Option<ZoneModels>> {
        Ok(self.table()?.zone_models(zone).cloned())
    }
}
